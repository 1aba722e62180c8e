//! Tempora: time-varying scalar values.
//!
//! A temporal value pairs a base value (`f64`, `i64`, `bool`, `String`) with
//! the time over which it held. The workspace is split into:
//!
//! * `tempora-core`: errors, configuration, logging and serde helpers
//! * `tempora-time`: timestamps, periods, period sets and timestamp sets
//! * `tempora-temporal`: the four temporal durations, their literal parser
//!   and the shared [`Temporal`] contract
//!
//! This crate is the text boundary a storage driver talks to: [`parse`] turns
//! a literal into a [`TemporalValue`] and [`to_text`] turns it back.

use tracing::debug;

pub use tempora_core::{
    config, logging, ConfigError, Interpolation, Result, TemporaConfig, TemporalDuration,
    TemporalError,
};
pub use tempora_temporal::*;
pub use tempora_time::{
    format_timestamp, parse_timestamp, parse_timestamp_with_offset, Period, PeriodSet, Timestamp,
    TimestampSet,
};

/// Tempora library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses a temporal literal, detecting its duration unless `expected` names one.
pub fn parse<V: BaseValue>(text: &str, expected: Option<TemporalDuration>) -> Result<TemporalValue<V>> {
    LiteralParser::default().parse(text, expected)
}

/// Renders a temporal value in the literal form [`parse`] reads back.
pub fn to_text<V: BaseValue>(value: &TemporalValue<V>) -> String {
    value.to_string()
}

/// Loads configuration from the environment (and `.env`), installs the
/// tracing subscriber at the configured level and returns a parser honouring
/// the configured default offset.
pub fn init() -> Result<LiteralParser> {
    let config = config::load_config()?;
    logging::init_tracing(config.log_level())?;
    debug!(offset = %config.default_offset, "tempora initialised");
    Ok(LiteralParser::from_config(&config))
}

pub mod prelude {
    pub use crate::{parse, to_text};
    pub use tempora_core::{Interpolation, TemporalDuration, TemporalError};
    pub use tempora_temporal::prelude::*;
    pub use tempora_time::prelude::*;
}
