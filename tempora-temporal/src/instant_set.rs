use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use tempora_core::{Result, TemporalDuration, TemporalError};
use tempora_time::{format_timestamp, Period, PeriodSet, Timestamp};

use crate::base::BaseValue;
use crate::instant::Instant;
use crate::parser::LiteralParser;
use crate::temporal::Temporal;

/// Instants at distinct timestamps, with no value defined between them.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantSet<V> {
    instants: Vec<Instant<V>>,
}

impl<V: BaseValue> InstantSet<V> {
    /// Sorts the instants by timestamp; two instants at the same timestamp
    /// are rejected.
    pub fn new(instants: impl IntoIterator<Item = Instant<V>>) -> Result<Self> {
        let mut instants: Vec<Instant<V>> = instants.into_iter().collect();
        if instants.is_empty() {
            return Err(TemporalError::Empty("instant set"));
        }
        instants.sort_by_key(Instant::timestamp);

        if let Some(pair) = instants
            .windows(2)
            .find(|pair| pair[0].timestamp() == pair[1].timestamp())
        {
            return Err(TemporalError::DuplicateTimestamp(format_timestamp(
                &pair[0].timestamp(),
            )));
        }
        Ok(Self { instants })
    }

    pub fn as_slice(&self) -> &[Instant<V>] {
        &self.instants
    }
}

impl<V: BaseValue> Temporal<V> for InstantSet<V> {
    fn duration(&self) -> TemporalDuration {
        TemporalDuration::InstantSet
    }

    fn time(&self) -> PeriodSet {
        PeriodSet::new(
            self.instants
                .iter()
                .map(|instant| Period::instant(instant.timestamp())),
        )
    }

    fn period(&self) -> Period {
        Period::instant(self.start_timestamp()).span(&Period::instant(self.end_timestamp()))
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
        Ok(Self { instants })
    }

    fn value_at_timestamp(&self, timestamp: &Timestamp) -> Option<V> {
        self.instants
            .binary_search_by_key(timestamp, Instant::timestamp)
            .ok()
            .map(|idx| self.instants[idx].value().clone())
    }
}

impl<V: BaseValue> fmt::Display for InstantSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, instant) in self.instants.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", instant)?;
        }
        f.write_str("}")
    }
}

impl<V: BaseValue> FromStr for InstantSet<V> {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        LiteralParser::default().parse_instant_set(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_time::{parse_timestamp, TimestampSet};

    fn ts(text: &str) -> Timestamp {
        parse_timestamp(text).unwrap()
    }

    #[test]
    fn parsed_set_exposes_accessors() {
        let set: InstantSet<f64> = "{10@2019-09-08, 20@2019-09-09, 20@2019-09-10}".parse().unwrap();
        assert_eq!(set.duration(), TemporalDuration::InstantSet);
        assert_eq!(set.num_instants(), 3);
        assert_eq!(set.start_value(), &10.0);
        assert_eq!(set.end_value(), &20.0);
        assert_eq!(set.values(), vec![10.0, 20.0]);
        assert_eq!(set.max_value().unwrap(), 20.0);
        assert_eq!(set.timespan(), Duration::days(2));
        assert_eq!(set.timestamp_n(2).unwrap(), ts("2019-09-09"));
        assert_eq!(set.time().num_periods(), 3);
        assert_eq!(set.period(), "[2019-09-08, 2019-09-10]".parse::<Period>().unwrap());
    }

    #[test]
    fn construction_sorts_by_time() {
        let set = InstantSet::new(vec![
            Instant::new(2_i64, ts("2019-09-09")),
            Instant::new(1_i64, ts("2019-09-08")),
        ])
        .unwrap();
        assert_eq!(set.timestamps(), vec![ts("2019-09-08"), ts("2019-09-09")]);
        assert_eq!(set.start_value(), &1);
    }

    #[test]
    fn rejects_duplicate_timestamps_and_empty_input() {
        let err = InstantSet::new(vec![
            Instant::new(1_i64, ts("2019-09-08")),
            Instant::new(2_i64, ts("2019-09-08")),
        ])
        .unwrap_err();
        assert!(matches!(err, TemporalError::DuplicateTimestamp(_)));
        assert_eq!(
            InstantSet::<i64>::new(Vec::new()),
            Err(TemporalError::Empty("instant set"))
        );
    }

    #[test]
    fn no_value_between_instants() {
        let set: InstantSet<i64> = "{1@2019-09-08, 2@2019-09-10}".parse().unwrap();
        assert_eq!(set.value_at_timestamp(&ts("2019-09-10")), Some(2));
        assert_eq!(set.value_at_timestamp(&ts("2019-09-09")), None);
        assert!(!set.intersects_period(&"[2019-09-08 12:00, 2019-09-09]".parse().unwrap()));
        assert!(set.intersects_timestamp_set(&TimestampSet::new(vec![ts("2019-09-10")])));
    }
}
