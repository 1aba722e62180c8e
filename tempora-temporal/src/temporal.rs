use std::cmp::Ordering;

use chrono::Duration;
use tempora_core::{Result, TemporalDuration, TemporalError};
use tempora_time::{Period, PeriodSet, Timestamp, TimestampSet};

use crate::base::BaseValue;
use crate::instant::Instant;

/// Contract shared by every temporal value, whatever its duration.
///
/// Positional accessors (`instant_n`, `timestamp_n`) are 1-based. The
/// intersection predicates are all defined from [`Temporal::time`]; a
/// variant may override them with a direct check that gives the same answer.
pub trait Temporal<V: BaseValue>: Sized {
    fn duration(&self) -> TemporalDuration;

    /// Distinct base values, in order of first occurrence.
    fn values(&self) -> Vec<V> {
        let mut values: Vec<V> = Vec::new();
        for instant in self.instants() {
            if !values.contains(instant.value()) {
                values.push(instant.value().clone());
            }
        }
        values
    }

    fn start_value(&self) -> &V {
        self.start_instant().value()
    }

    fn end_value(&self) -> &V {
        self.end_instant().value()
    }

    fn min_value(&self) -> Result<V> {
        extremum(self.values(), Ordering::Less)
    }

    fn max_value(&self) -> Result<V> {
        extremum(self.values(), Ordering::Greater)
    }

    /// Exactly the time on which the value is defined.
    fn time(&self) -> PeriodSet;

    /// Period from the start to the end timestamp, ignoring gaps.
    fn period(&self) -> Period;

    fn timespan(&self) -> Duration {
        self.end_timestamp() - self.start_timestamp()
    }

    fn num_instants(&self) -> usize {
        self.instants().len()
    }

    fn start_instant(&self) -> &Instant<V>;

    fn end_instant(&self) -> &Instant<V>;

    fn instant_n(&self, n: usize) -> Result<&Instant<V>> {
        let instants = self.instants();
        let idx = TemporalError::check_index(n, instants.len())?;
        Ok(instants[idx])
    }

    fn instants(&self) -> Vec<&Instant<V>>;

    fn num_timestamps(&self) -> usize {
        self.timestamps().len()
    }

    fn start_timestamp(&self) -> Timestamp {
        self.start_instant().timestamp()
    }

    fn end_timestamp(&self) -> Timestamp {
        self.end_instant().timestamp()
    }

    fn timestamp_n(&self, n: usize) -> Result<Timestamp> {
        let timestamps = self.timestamps();
        let idx = TemporalError::check_index(n, timestamps.len())?;
        Ok(timestamps[idx])
    }

    /// Distinct timestamps in increasing order.
    fn timestamps(&self) -> Vec<Timestamp> {
        let mut timestamps: Vec<Timestamp> = self
            .instants()
            .into_iter()
            .map(Instant::timestamp)
            .collect();
        timestamps.dedup();
        timestamps
    }

    /// A copy with every timestamp moved by `delta`; bound flags are kept.
    fn shift(&self, delta: Duration) -> Result<Self>;

    /// Point query: the value held at `timestamp`, if the value is defined there.
    fn value_at_timestamp(&self, timestamp: &Timestamp) -> Option<V>;

    fn intersects_timestamp(&self, timestamp: &Timestamp) -> bool {
        self.time().contains_timestamp(timestamp)
    }

    fn intersects_timestamp_set(&self, timestamps: &TimestampSet) -> bool {
        let time = self.time();
        timestamps
            .timestamps()
            .iter()
            .any(|timestamp| time.contains_timestamp(timestamp))
    }

    fn intersects_period(&self, period: &Period) -> bool {
        self.time().intersects_period(period)
    }

    fn intersects_period_set(&self, periods: &PeriodSet) -> bool {
        self.time().intersects_period_set(periods)
    }
}

fn extremum<V: BaseValue>(values: Vec<V>, keep: Ordering) -> Result<V> {
    let mut iter = values.into_iter();
    let mut best = iter.next().ok_or(TemporalError::Empty(V::TYPE_NAME))?;
    if best.compare(&best).is_none() {
        return Err(TemporalError::NotComparable(V::TYPE_NAME));
    }
    for candidate in iter {
        match candidate.compare(&best) {
            Some(ordering) if ordering == keep => best = candidate,
            Some(_) => {}
            None => return Err(TemporalError::NotComparable(V::TYPE_NAME)),
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremum_follows_base_ordering() {
        assert_eq!(extremum(vec![3_i64, 1, 2], Ordering::Less), Ok(1));
        assert_eq!(extremum(vec![3_i64, 1, 2], Ordering::Greater), Ok(3));
        assert_eq!(
            extremum(vec!["b".to_string(), "a".to_string()], Ordering::Less),
            Ok("a".to_string())
        );
    }

    #[test]
    fn unordered_values_are_not_comparable() {
        assert_eq!(
            extremum(vec![1.0, f64::NAN], Ordering::Less),
            Err(TemporalError::NotComparable("float"))
        );
        assert_eq!(
            extremum(vec![f64::NAN], Ordering::Greater),
            Err(TemporalError::NotComparable("float"))
        );
    }
}
