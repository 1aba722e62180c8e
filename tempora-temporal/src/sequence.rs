use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use tempora_core::{Interpolation, Result, TemporalDuration, TemporalError};
use tempora_time::{format_timestamp, Period, PeriodSet, Timestamp};

use crate::base::BaseValue;
use crate::instant::Instant;
use crate::parser::{LiteralParser, STEP_MARKER};
use crate::temporal::Temporal;

/// A value evolving over one contiguous period.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<V> {
    instants: Vec<Instant<V>>,
    period: Period,
    interpolation: Interpolation,
}

impl<V: BaseValue> Sequence<V> {
    /// Builds a sequence from instants given in strictly increasing time
    /// order. A single instant requires both bounds to be inclusive.
    pub fn new(
        instants: impl IntoIterator<Item = Instant<V>>,
        lower_inc: bool,
        upper_inc: bool,
        interpolation: Interpolation,
    ) -> Result<Self> {
        let instants: Vec<Instant<V>> = instants.into_iter().collect();
        let (first, last) = match (instants.first(), instants.last()) {
            (Some(first), Some(last)) => (first.timestamp(), last.timestamp()),
            _ => return Err(TemporalError::Empty("sequence")),
        };

        if !V::supports(interpolation) {
            return Err(TemporalError::UnsupportedInterpolation {
                interpolation: interpolation.to_string(),
                base: V::TYPE_NAME,
            });
        }

        if let Some(pair) = instants
            .windows(2)
            .find(|pair| pair[0].timestamp() >= pair[1].timestamp())
        {
            return Err(TemporalError::NonMonotonicTime(format!(
                "{} is followed by {}",
                format_timestamp(&pair[0].timestamp()),
                format_timestamp(&pair[1].timestamp())
            )));
        }

        let period = Period::new(first, last, lower_inc, upper_inc)?;
        Ok(Self {
            instants,
            period,
            interpolation,
        })
    }

    pub fn lower_inc(&self) -> bool {
        self.period.lower_inc()
    }

    pub fn upper_inc(&self) -> bool {
        self.period.upper_inc()
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn as_slice(&self) -> &[Instant<V>] {
        &self.instants
    }

    /// Writes the bracketed body, without the interpolation marker.
    pub(crate) fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.lower_inc() { "[" } else { "(" })?;
        for (idx, instant) in self.instants.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", instant)?;
        }
        f.write_str(if self.upper_inc() { "]" } else { ")" })
    }
}

/// Whether the literal form must spell out step interpolation.
pub(crate) fn needs_step_marker<V: BaseValue>(interpolation: Interpolation) -> bool {
    interpolation != V::default_interpolation()
}

impl<V: BaseValue> Temporal<V> for Sequence<V> {
    fn duration(&self) -> TemporalDuration {
        TemporalDuration::Sequence
    }

    fn time(&self) -> PeriodSet {
        PeriodSet::from(self.period)
    }

    fn period(&self) -> Period {
        self.period
    }

    fn num_instants(&self) -> usize {
        self.instants.len()
    }

    fn start_instant(&self) -> &Instant<V> {
        &self.instants[0]
    }

    fn end_instant(&self) -> &Instant<V> {
        &self.instants[self.instants.len() - 1]
    }

    fn instants(&self) -> Vec<&Instant<V>> {
        self.instants.iter().collect()
    }

    fn num_timestamps(&self) -> usize {
        self.instants.len()
    }

    fn shift(&self, delta: Duration) -> Result<Self> {
        let instants = self
            .instants
            .iter()
            .map(|instant| instant.shift(delta))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            instants,
            period: self.period.shift(delta)?,
            interpolation: self.interpolation,
        })
    }

    /// Step holds the previous sample; linear interpolates between the two
    /// surrounding samples.
    fn value_at_timestamp(&self, timestamp: &Timestamp) -> Option<V> {
        if !self.period.contains_timestamp(timestamp) {
            return None;
        }
        let idx = self
            .instants
            .partition_point(|instant| instant.timestamp() <= *timestamp);
        let previous = &self.instants[idx.checked_sub(1)?];
        if previous.timestamp() == *timestamp {
            return Some(previous.value().clone());
        }
        let next = self.instants.get(idx)?;

        match self.interpolation {
            Interpolation::Step => Some(previous.value().clone()),
            Interpolation::Linear => {
                let elapsed = nanos(*timestamp - previous.timestamp());
                let total = nanos(next.timestamp() - previous.timestamp());
                previous.value().interpolate(next.value(), elapsed / total)
            }
        }
    }
}

fn nanos(delta: Duration) -> f64 {
    delta
        .num_nanoseconds()
        .map(|n| n as f64)
        .unwrap_or_else(|| delta.num_milliseconds() as f64 * 1e6)
}

impl<V: BaseValue> fmt::Display for Sequence<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_step_marker::<V>(self.interpolation) {
            f.write_str(STEP_MARKER)?;
        }
        self.fmt_body(f)
    }
}

impl<V: BaseValue> FromStr for Sequence<V> {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        LiteralParser::default().parse_sequence(s)
    }
}
