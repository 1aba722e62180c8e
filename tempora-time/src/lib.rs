//! Time primitives for the tempora crates.
//!
//! Timestamps are `chrono::DateTime<Utc>`; periods carry independent
//! inclusive/exclusive bounds; period sets and timestamp sets are kept in
//! canonical (sorted, merged or deduplicated) form from construction on.
//! Each primitive reads and writes the same literal text.

pub mod lexer;
pub mod parse;
mod period;
mod period_set;
mod timestamp;
mod timestamp_set;

pub use period::Period;
pub use period_set::PeriodSet;
pub use timestamp::{
    format_timestamp, parse_timestamp, parse_timestamp_with_offset, shift_timestamp, Timestamp,
};
pub use timestamp_set::TimestampSet;

pub mod prelude {
    pub use crate::{parse_timestamp, Period, PeriodSet, Timestamp, TimestampSet};
}
