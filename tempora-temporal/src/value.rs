use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tempora_core::serde_utils::{deserialize_literal, serialize_literal};
use tempora_core::{Result, TemporalDuration, TemporalError};
use tempora_time::{Period, PeriodSet, Timestamp, TimestampSet};

use crate::base::BaseValue;
use crate::instant::Instant;
use crate::instant_set::InstantSet;
use crate::parser::LiteralParser;
use crate::sequence::Sequence;
use crate::sequence_set::SequenceSet;
use crate::temporal::Temporal;

/// A temporal value of any duration.
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalValue<V> {
    Instant(Instant<V>),
    InstantSet(InstantSet<V>),
    Sequence(Sequence<V>),
    SequenceSet(SequenceSet<V>),
}

macro_rules! dispatch {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            TemporalValue::Instant($inner) => $body,
            TemporalValue::InstantSet($inner) => $body,
            TemporalValue::Sequence($inner) => $body,
            TemporalValue::SequenceSet($inner) => $body,
        }
    };
}

impl<V: BaseValue> TemporalValue<V> {
    pub fn into_instant(self) -> Option<Instant<V>> {
        match self {
            TemporalValue::Instant(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn into_instant_set(self) -> Option<InstantSet<V>> {
        match self {
            TemporalValue::InstantSet(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn into_sequence(self) -> Option<Sequence<V>> {
        match self {
            TemporalValue::Sequence(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn into_sequence_set(self) -> Option<SequenceSet<V>> {
        match self {
            TemporalValue::SequenceSet(inner) => Some(inner),
            _ => None,
        }
    }
}

impl<V: BaseValue> Temporal<V> for TemporalValue<V> {
    fn duration(&self) -> TemporalDuration {
        dispatch!(self, inner => inner.duration())
    }

    fn values(&self) -> Vec<V> {
        dispatch!(self, inner => inner.values())
    }

    fn time(&self) -> PeriodSet {
        dispatch!(self, inner => inner.time())
    }

    fn period(&self) -> Period {
        dispatch!(self, inner => inner.period())
    }

    fn num_instants(&self) -> usize {
        dispatch!(self, inner => inner.num_instants())
    }

    fn start_instant(&self) -> &Instant<V> {
        dispatch!(self, inner => inner.start_instant())
    }

    fn end_instant(&self) -> &Instant<V> {
        dispatch!(self, inner => inner.end_instant())
    }

    fn instants(&self) -> Vec<&Instant<V>> {
        dispatch!(self, inner => inner.instants())
    }

    fn num_timestamps(&self) -> usize {
        dispatch!(self, inner => inner.num_timestamps())
    }

    fn shift(&self, delta: Duration) -> Result<Self> {
        Ok(match self {
            TemporalValue::Instant(inner) => TemporalValue::Instant(inner.shift(delta)?),
            TemporalValue::InstantSet(inner) => TemporalValue::InstantSet(inner.shift(delta)?),
            TemporalValue::Sequence(inner) => TemporalValue::Sequence(inner.shift(delta)?),
            TemporalValue::SequenceSet(inner) => TemporalValue::SequenceSet(inner.shift(delta)?),
        })
    }

    fn value_at_timestamp(&self, timestamp: &Timestamp) -> Option<V> {
        dispatch!(self, inner => inner.value_at_timestamp(timestamp))
    }

    fn intersects_timestamp(&self, timestamp: &Timestamp) -> bool {
        dispatch!(self, inner => inner.intersects_timestamp(timestamp))
    }

    fn intersects_timestamp_set(&self, timestamps: &TimestampSet) -> bool {
        dispatch!(self, inner => inner.intersects_timestamp_set(timestamps))
    }

    fn intersects_period(&self, period: &Period) -> bool {
        dispatch!(self, inner => inner.intersects_period(period))
    }

    fn intersects_period_set(&self, periods: &PeriodSet) -> bool {
        dispatch!(self, inner => inner.intersects_period_set(periods))
    }
}

impl<V> From<Instant<V>> for TemporalValue<V> {
    fn from(inner: Instant<V>) -> Self {
        TemporalValue::Instant(inner)
    }
}

impl<V> From<InstantSet<V>> for TemporalValue<V> {
    fn from(inner: InstantSet<V>) -> Self {
        TemporalValue::InstantSet(inner)
    }
}

impl<V> From<Sequence<V>> for TemporalValue<V> {
    fn from(inner: Sequence<V>) -> Self {
        TemporalValue::Sequence(inner)
    }
}

impl<V> From<SequenceSet<V>> for TemporalValue<V> {
    fn from(inner: SequenceSet<V>) -> Self {
        TemporalValue::SequenceSet(inner)
    }
}

impl<V: BaseValue> fmt::Display for TemporalValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, inner => fmt::Display::fmt(inner, f))
    }
}

/// Detects the duration from the literal itself.
impl<V: BaseValue> FromStr for TemporalValue<V> {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        LiteralParser::default().parse(s, None)
    }
}

// Every temporal value travels through serde as its literal text.
macro_rules! literal_serde {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl<V: BaseValue> Serialize for $ty<V> {
                fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                    serialize_literal(self, serializer)
                }
            }

            impl<'de, V: BaseValue> Deserialize<'de> for $ty<V> {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                    deserialize_literal(deserializer)
                }
            }
        )+
    };
}

literal_serde!(Instant, InstantSet, Sequence, SequenceSet, TemporalValue);
