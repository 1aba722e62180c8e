//! Temporal values: a base value paired with the time over which it held.
//!
//! Four durations share one contract, [`Temporal`]:
//! [`Instant`], [`InstantSet`], [`Sequence`] and [`SequenceSet`]. The closed
//! [`TemporalValue`] enum holds any of them. Every variant is built either
//! directly or from its literal text through [`LiteralParser`], and prints
//! back to the same text.

mod base;
mod instant;
mod instant_set;
pub mod parser;
mod sequence;
mod sequence_set;
mod temporal;
mod value;

pub use base::BaseValue;
pub use instant::Instant;
pub use instant_set::InstantSet;
pub use parser::{LiteralParser, STEP_MARKER};
pub use sequence::Sequence;
pub use sequence_set::SequenceSet;
pub use temporal::Temporal;
pub use value::TemporalValue;

pub type TFloat = TemporalValue<f64>;
pub type TFloatInst = Instant<f64>;
pub type TFloatInstSet = InstantSet<f64>;
pub type TFloatSeq = Sequence<f64>;
pub type TFloatSeqSet = SequenceSet<f64>;

pub type TInt = TemporalValue<i64>;
pub type TIntInst = Instant<i64>;
pub type TIntInstSet = InstantSet<i64>;
pub type TIntSeq = Sequence<i64>;
pub type TIntSeqSet = SequenceSet<i64>;

pub type TBool = TemporalValue<bool>;
pub type TBoolInst = Instant<bool>;
pub type TBoolInstSet = InstantSet<bool>;
pub type TBoolSeq = Sequence<bool>;
pub type TBoolSeqSet = SequenceSet<bool>;

pub type TText = TemporalValue<String>;
pub type TTextInst = Instant<String>;
pub type TTextInstSet = InstantSet<String>;
pub type TTextSeq = Sequence<String>;
pub type TTextSeqSet = SequenceSet<String>;

pub mod prelude {
    pub use crate::{
        BaseValue, Instant, InstantSet, LiteralParser, Sequence, SequenceSet, Temporal,
        TemporalValue,
    };
}
