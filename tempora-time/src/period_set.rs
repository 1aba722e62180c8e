use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tempora_core::serde_utils::{deserialize_literal, serialize_literal};
use tempora_core::{Result, TemporalError};
use tracing::debug;

use crate::parse::parse_period_set;
use crate::period::Period;
use crate::timestamp::Timestamp;

/// Canonical union of disjoint, non-adjacent periods ordered by start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PeriodSet {
    periods: Vec<Period>,
}

impl PeriodSet {
    /// Sorts the periods and merges every overlapping or adjacent pair.
    pub fn new(periods: impl IntoIterator<Item = Period>) -> Self {
        let mut sorted: Vec<Period> = periods.into_iter().collect();
        sorted.sort_by(Period::cmp_start);
        let input_len = sorted.len();

        let mut merged: Vec<Period> = Vec::with_capacity(input_len);
        for period in sorted {
            match merged.last_mut() {
                Some(last) if last.overlaps(&period) || last.is_adjacent(&period) => {
                    *last = last.span(&period);
                }
                _ => merged.push(period),
            }
        }

        if merged.len() < input_len {
            debug!(
                input = input_len,
                output = merged.len(),
                "merged overlapping periods"
            );
        }
        Self { periods: merged }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn num_periods(&self) -> usize {
        self.periods.len()
    }

    pub fn start_period(&self) -> Option<&Period> {
        self.periods.first()
    }

    pub fn end_period(&self) -> Option<&Period> {
        self.periods.last()
    }

    /// 1-based access.
    pub fn period_n(&self, n: usize) -> Result<&Period> {
        let idx = TemporalError::check_index(n, self.periods.len())?;
        Ok(&self.periods[idx])
    }

    /// Single period from the first start to the last end, ignoring gaps.
    pub fn span(&self) -> Option<Period> {
        match (self.periods.first(), self.periods.last()) {
            (Some(first), Some(last)) => Some(first.span(last)),
            _ => None,
        }
    }

    /// Sum of the durations of the member periods.
    pub fn duration(&self) -> Duration {
        self.periods
            .iter()
            .fold(Duration::zero(), |acc, period| acc + period.duration())
    }

    pub fn contains_timestamp(&self, timestamp: &Timestamp) -> bool {
        self.periods
            .binary_search_by(|period| {
                if period.contains_timestamp(timestamp) {
                    Ordering::Equal
                } else if period.upper() <= *timestamp {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            })
            .is_ok()
    }

    pub fn intersects_period(&self, period: &Period) -> bool {
        let idx = self.periods.partition_point(|candidate| candidate.is_before(period));
        self.periods
            .get(idx)
            .map(|candidate| candidate.overlaps(period))
            .unwrap_or(false)
    }

    pub fn intersects_period_set(&self, other: &PeriodSet) -> bool {
        let (mut i, mut j) = (0, 0);
        while let (Some(left), Some(right)) = (self.periods.get(i), other.periods.get(j)) {
            if left.overlaps(right) {
                return true;
            }
            if left.is_before(right) {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }

    pub fn shift(&self, delta: Duration) -> Result<PeriodSet> {
        let periods = self
            .periods
            .iter()
            .map(|period| period.shift(delta))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { periods })
    }
}

impl From<Period> for PeriodSet {
    fn from(period: Period) -> Self {
        Self {
            periods: vec![period],
        }
    }
}

impl fmt::Display for PeriodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, period) in self.periods.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", period)?;
        }
        f.write_str("}")
    }
}

impl FromStr for PeriodSet {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        parse_period_set(s)
    }
}

impl Serialize for PeriodSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_literal(self, serializer)
    }
}

impl<'de> Deserialize<'de> for PeriodSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_literal(deserializer)
    }
}
