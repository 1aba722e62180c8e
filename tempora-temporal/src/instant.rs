use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use tempora_core::{Result, TemporalDuration, TemporalError};
use tempora_time::{format_timestamp, shift_timestamp, Period, PeriodSet, Timestamp, TimestampSet};

use crate::base::{BaseValue, Literal};
use crate::parser::LiteralParser;
use crate::temporal::Temporal;

/// A value observed at a single timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Instant<V> {
    value: V,
    timestamp: Timestamp,
}

impl<V: BaseValue> Instant<V> {
    pub fn new(value: V, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }

    /// Builds an instant from separate value and timestamp texts.
    pub fn from_parts(value: &str, timestamp: &str) -> Result<Self> {
        LiteralParser::default().parse_instant_parts(value, timestamp)
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn into_parts(self) -> (V, Timestamp) {
        (self.value, self.timestamp)
    }
}

impl<V: BaseValue> Temporal<V> for Instant<V> {
    fn duration(&self) -> TemporalDuration {
        TemporalDuration::Instant
    }

    fn values(&self) -> Vec<V> {
        vec![self.value.clone()]
    }

    fn time(&self) -> PeriodSet {
        PeriodSet::from(self.period())
    }

    fn period(&self) -> Period {
        Period::instant(self.timestamp)
    }

    fn num_instants(&self) -> usize {
        1
    }

    fn start_instant(&self) -> &Instant<V> {
        self
    }

    fn end_instant(&self) -> &Instant<V> {
        self
    }

    fn instants(&self) -> Vec<&Instant<V>> {
        vec![self]
    }

    fn shift(&self, delta: Duration) -> Result<Self> {
        Ok(Self {
            value: self.value.clone(),
            timestamp: shift_timestamp(&self.timestamp, delta)?,
        })
    }

    fn value_at_timestamp(&self, timestamp: &Timestamp) -> Option<V> {
        (self.timestamp == *timestamp).then(|| self.value.clone())
    }

    fn intersects_timestamp(&self, timestamp: &Timestamp) -> bool {
        self.timestamp == *timestamp
    }

    fn intersects_timestamp_set(&self, timestamps: &TimestampSet) -> bool {
        timestamps.contains(&self.timestamp)
    }

    fn intersects_period(&self, period: &Period) -> bool {
        period.contains_timestamp(&self.timestamp)
    }

    fn intersects_period_set(&self, periods: &PeriodSet) -> bool {
        periods.contains_timestamp(&self.timestamp)
    }
}

impl<V: BaseValue> From<(V, Timestamp)> for Instant<V> {
    fn from((value, timestamp): (V, Timestamp)) -> Self {
        Self::new(value, timestamp)
    }
}

impl<V: BaseValue> TryFrom<(&str, &str)> for Instant<V> {
    type Error = TemporalError;

    fn try_from((value, timestamp): (&str, &str)) -> Result<Self> {
        Self::from_parts(value, timestamp)
    }
}

impl<V: BaseValue> fmt::Display for Instant<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}",
            Literal(&self.value),
            format_timestamp(&self.timestamp)
        )
    }
}

impl<V: BaseValue> FromStr for Instant<V> {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        LiteralParser::default().parse_instant(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_time::parse_timestamp;

    fn ts(text: &str) -> Timestamp {
        parse_timestamp(text).unwrap()
    }

    #[test]
    fn construction_paths_agree() {
        let literal: Instant<f64> = "10@2019-09-08".parse().unwrap();
        let parts = Instant::<f64>::from_parts("10", "2019-09-08").unwrap();
        let pair = Instant::from((10.0, ts("2019-09-08")));
        let text_pair = Instant::<f64>::try_from(("10", "2019-09-08")).unwrap();

        assert_eq!(literal, parts);
        assert_eq!(literal, pair);
        assert_eq!(literal, text_pair);
        assert_eq!(literal.value(), &10.0);
        assert_eq!(literal.timestamp(), ts("2019-09-08"));
    }

    #[test]
    fn degenerate_accessors() {
        let inst = Instant::new(10.0, ts("2019-09-08"));
        assert_eq!(inst.duration(), TemporalDuration::Instant);
        assert_eq!(inst.timespan(), Duration::zero());
        assert_eq!(inst.num_instants(), 1);
        assert_eq!(inst.instant_n(1).unwrap(), &inst);
        assert!(matches!(
            inst.instant_n(2),
            Err(TemporalError::IndexOutOfRange { index: 2, len: 1 })
        ));

        let period = inst.period();
        assert!(period.lower_inc() && period.upper_inc());
        assert_eq!(period.lower(), ts("2019-09-08"));
        assert_eq!(period.upper(), ts("2019-09-08"));
        assert_eq!(inst.time(), PeriodSet::from(period));
        assert_eq!(inst.values(), vec![10.0]);
        assert_eq!(inst.min_value().unwrap(), 10.0);
    }

    #[test]
    fn direct_intersections_match_time_based_ones() {
        let inst = Instant::new(1_i64, ts("2019-09-08"));
        let periods: PeriodSet = "{[2019-09-01, 2019-09-08), [2019-09-09, 2019-09-10]}".parse().unwrap();
        let closed: Period = "[2019-09-07, 2019-09-08]".parse().unwrap();
        let open: Period = "[2019-09-07, 2019-09-08)".parse().unwrap();

        assert_eq!(inst.intersects_period_set(&periods), inst.time().intersects_period_set(&periods));
        assert!(inst.intersects_period(&closed));
        assert!(!inst.intersects_period(&open));
        assert!(inst.intersects_timestamp(&ts("2019-09-08")));
        assert!(!inst.intersects_timestamp_set(&TimestampSet::new(vec![ts("2019-09-09")])));
    }

    #[test]
    fn shift_returns_new_value() {
        let inst = Instant::new(true, ts("2019-09-08"));
        let shifted = inst.shift(Duration::hours(6)).unwrap();
        assert_eq!(inst.timestamp(), ts("2019-09-08"));
        assert_eq!(shifted.timestamp(), ts("2019-09-08 06:00"));
        assert_eq!(shifted.to_string(), "t@2019-09-08 06:00:00+00:00");
    }
}
