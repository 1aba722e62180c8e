use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tempora_core::serde_utils::{deserialize_literal, serialize_literal};
use tempora_core::{Result, TemporalError};

use crate::parse::parse_timestamp_set;
use crate::period::Period;
use crate::period_set::PeriodSet;
use crate::timestamp::{format_timestamp, shift_timestamp, Timestamp};

/// Finite set of distinct timestamps in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TimestampSet {
    timestamps: Vec<Timestamp>,
}

impl TimestampSet {
    pub fn new(timestamps: impl IntoIterator<Item = Timestamp>) -> Self {
        let mut timestamps: Vec<Timestamp> = timestamps.into_iter().collect();
        timestamps.sort_unstable();
        timestamps.dedup();
        Self { timestamps }
    }

    pub fn timestamps(&self) -> &[Timestamp] {
        &self.timestamps
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn num_timestamps(&self) -> usize {
        self.timestamps.len()
    }

    pub fn start_timestamp(&self) -> Option<Timestamp> {
        self.timestamps.first().copied()
    }

    pub fn end_timestamp(&self) -> Option<Timestamp> {
        self.timestamps.last().copied()
    }

    /// 1-based access.
    pub fn timestamp_n(&self, n: usize) -> Result<Timestamp> {
        let idx = TemporalError::check_index(n, self.timestamps.len())?;
        Ok(self.timestamps[idx])
    }

    pub fn contains(&self, timestamp: &Timestamp) -> bool {
        self.timestamps.binary_search(timestamp).is_ok()
    }

    /// One degenerate period per timestamp.
    pub fn to_period_set(&self) -> PeriodSet {
        PeriodSet::new(self.timestamps.iter().copied().map(Period::instant))
    }

    pub fn shift(&self, delta: Duration) -> Result<TimestampSet> {
        let timestamps = self
            .timestamps
            .iter()
            .map(|timestamp| shift_timestamp(timestamp, delta))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { timestamps })
    }
}

impl fmt::Display for TimestampSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, timestamp) in self.timestamps.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&format_timestamp(timestamp))?;
        }
        f.write_str("}")
    }
}

impl FromStr for TimestampSet {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        parse_timestamp_set(s)
    }
}

impl Serialize for TimestampSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_literal(self, serializer)
    }
}

impl<'de> Deserialize<'de> for TimestampSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserialize_literal(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::parse_timestamp;

    fn ts(text: &str) -> Timestamp {
        parse_timestamp(text).unwrap()
    }

    #[test]
    fn construction_sorts_and_deduplicates() {
        let set = TimestampSet::new(vec![ts("2019-09-10"), ts("2019-09-08"), ts("2019-09-10")]);
        assert_eq!(set.timestamps(), &[ts("2019-09-08"), ts("2019-09-10")]);
        assert_eq!(set.timestamp_n(2).unwrap(), ts("2019-09-10"));
        assert!(matches!(
            set.timestamp_n(0),
            Err(TemporalError::IndexOutOfRange { index: 0, len: 2 })
        ));
        assert!(set.contains(&ts("2019-09-08")));
        assert!(!set.contains(&ts("2019-09-09")));
    }

    #[test]
    fn shift_moves_every_timestamp() {
        let set: TimestampSet = "{2019-09-08, 2019-09-09}".parse().unwrap();
        let shifted = set.shift(Duration::days(2)).unwrap();
        assert_eq!(shifted.start_timestamp(), Some(ts("2019-09-10")));
        assert_eq!(shifted.end_timestamp(), Some(ts("2019-09-11")));
        assert_eq!(shifted.to_period_set().num_periods(), 2);
    }

    #[test]
    fn serde_uses_literal_text() {
        let set: TimestampSet = "{2019-09-08}".parse().unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#""{2019-09-08 00:00:00+00:00}""#);
        assert_eq!(serde_json::from_str::<TimestampSet>(&json).unwrap(), set);
    }
}
