use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tempora_core::serde_utils::{deserialize_literal, serialize_literal};
use tempora_core::{Result, TemporalError};

use crate::parse::parse_period;
use crate::timestamp::{format_timestamp, shift_timestamp, Timestamp};

/// Bounded time interval with independent inclusive/exclusive ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    lower: Timestamp,
    upper: Timestamp,
    lower_inc: bool,
    upper_inc: bool,
}

impl Period {
    /// Builds a period, failing when `lower > upper` or when a degenerate
    /// period has an exclusive end.
    pub fn new(lower: Timestamp, upper: Timestamp, lower_inc: bool, upper_inc: bool) -> Result<Self> {
        match lower.cmp(&upper) {
            Ordering::Greater => Err(TemporalError::InvalidInterval(format!(
                "lower bound {} is after upper bound {}",
                format_timestamp(&lower),
                format_timestamp(&upper)
            ))),
            Ordering::Equal if !(lower_inc && upper_inc) => Err(TemporalError::InvalidInterval(
                format!(
                    "degenerate period at {} must include both bounds",
                    format_timestamp(&lower)
                ),
            )),
            _ => Ok(Self {
                lower,
                upper,
                lower_inc,
                upper_inc,
            }),
        }
    }

    /// Degenerate period `[t, t]`.
    pub fn instant(timestamp: Timestamp) -> Self {
        Self {
            lower: timestamp,
            upper: timestamp,
            lower_inc: true,
            upper_inc: true,
        }
    }

    pub fn lower(&self) -> Timestamp {
        self.lower
    }

    pub fn upper(&self) -> Timestamp {
        self.upper
    }

    pub fn lower_inc(&self) -> bool {
        self.lower_inc
    }

    pub fn upper_inc(&self) -> bool {
        self.upper_inc
    }

    pub fn duration(&self) -> Duration {
        self.upper - self.lower
    }

    pub fn is_instant(&self) -> bool {
        self.lower == self.upper
    }

    pub fn contains_timestamp(&self, timestamp: &Timestamp) -> bool {
        let after_lower = match timestamp.cmp(&self.lower) {
            Ordering::Greater => true,
            Ordering::Equal => self.lower_inc,
            Ordering::Less => false,
        };
        let before_upper = match timestamp.cmp(&self.upper) {
            Ordering::Less => true,
            Ordering::Equal => self.upper_inc,
            Ordering::Greater => false,
        };
        after_lower && before_upper
    }

    /// Whether every point of `self` lies strictly before every point of `other`.
    pub fn is_before(&self, other: &Period) -> bool {
        match self.upper.cmp(&other.lower) {
            Ordering::Less => true,
            Ordering::Equal => !(self.upper_inc && other.lower_inc),
            Ordering::Greater => false,
        }
    }

    /// Whether the two periods share at least one point.
    pub fn overlaps(&self, other: &Period) -> bool {
        !self.is_before(other) && !other.is_before(self)
    }

    /// Whether the periods touch at one endpoint that exactly one side includes.
    pub fn is_adjacent(&self, other: &Period) -> bool {
        let touches = |left: &Period, right: &Period| {
            left.upper == right.lower && (left.upper_inc != right.lower_inc)
        };
        touches(self, other) || touches(other, self)
    }

    /// Union of two overlapping or adjacent periods.
    pub fn merge(&self, other: &Period) -> Result<Period> {
        if self.overlaps(other) || self.is_adjacent(other) {
            Ok(self.span(other))
        } else {
            Err(TemporalError::InvalidInterval(format!(
                "cannot merge disjoint periods {} and {}",
                self, other
            )))
        }
    }

    /// Smallest period covering both periods, gaps included.
    pub fn span(&self, other: &Period) -> Period {
        let (lower, lower_inc) = match self.lower.cmp(&other.lower) {
            Ordering::Less => (self.lower, self.lower_inc),
            Ordering::Greater => (other.lower, other.lower_inc),
            Ordering::Equal => (self.lower, self.lower_inc || other.lower_inc),
        };
        let (upper, upper_inc) = match self.upper.cmp(&other.upper) {
            Ordering::Greater => (self.upper, self.upper_inc),
            Ordering::Less => (other.upper, other.upper_inc),
            Ordering::Equal => (self.upper, self.upper_inc || other.upper_inc),
        };
        Period {
            lower,
            upper,
            lower_inc,
            upper_inc,
        }
    }

    pub fn shift(&self, delta: Duration) -> Result<Period> {
        Ok(Period {
            lower: shift_timestamp(&self.lower, delta)?,
            upper: shift_timestamp(&self.upper, delta)?,
            ..*self
        })
    }

    /// Ordering by start, an inclusive start sorting first.
    pub fn cmp_start(&self, other: &Period) -> Ordering {
        self.lower
            .cmp(&other.lower)
            .then_with(|| other.lower_inc.cmp(&self.lower_inc))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.lower_inc { '[' } else { '(' },
            format_timestamp(&self.lower),
            format_timestamp(&self.upper),
            if self.upper_inc { ']' } else { ')' }
        )
    }
}

impl FromStr for Period {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        parse_period(s)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_literal(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Period {
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

    fn period(text: &str) -> Period {
        text.parse().unwrap()
    }

    #[test]
    fn rejects_inverted_and_open_degenerate_bounds() {
        let a = ts("2019-09-08");
        let b = ts("2019-09-09");
        assert!(matches!(
            Period::new(b, a, true, true),
            Err(TemporalError::InvalidInterval(_))
        ));
        assert!(matches!(
            Period::new(a, a, true, false),
            Err(TemporalError::InvalidInterval(_))
        ));
        assert!(Period::new(a, a, true, true).unwrap().is_instant());
    }

    #[test]
    fn containment_respects_bound_flags() {
        let p = period("(2019-09-08, 2019-09-10]");
        assert!(!p.contains_timestamp(&ts("2019-09-08")));
        assert!(p.contains_timestamp(&ts("2019-09-09")));
        assert!(p.contains_timestamp(&ts("2019-09-10")));
        assert!(!p.contains_timestamp(&ts("2019-09-11")));
    }

    #[test]
    fn touching_periods_overlap_only_when_both_sides_include() {
        let left = period("[2019-09-08, 2019-09-09]");
        assert!(left.overlaps(&period("[2019-09-09, 2019-09-10]")));
        assert!(!left.overlaps(&period("(2019-09-09, 2019-09-10]")));
        assert!(left.is_adjacent(&period("(2019-09-09, 2019-09-10]")));
        assert!(!period("[2019-09-08, 2019-09-09)").is_adjacent(&period("(2019-09-09, 2019-09-10]")));
    }

    #[test]
    fn merge_spans_adjacent_and_rejects_gaps() {
        let merged = period("[2019-09-08, 2019-09-09)")
            .merge(&period("[2019-09-09, 2019-09-10)"))
            .unwrap();
        assert_eq!(merged, period("[2019-09-08, 2019-09-10)"));

        let err = period("[2019-09-08, 2019-09-09)")
            .merge(&period("(2019-09-09, 2019-09-10)"))
            .unwrap_err();
        assert!(matches!(err, TemporalError::InvalidInterval(_)));
    }

    #[test]
    fn shift_keeps_flags() {
        let shifted = period("(2019-09-08, 2019-09-09]").shift(Duration::hours(12)).unwrap();
        assert_eq!(shifted, period("(2019-09-08 12:00, 2019-09-09 12:00]"));
        assert_eq!(shifted.duration(), Duration::days(1));
    }

    #[test]
    fn serializes_as_literal() {
        let p = period("[2019-09-08, 2019-09-09)");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#""[2019-09-08 00:00:00+00:00, 2019-09-09 00:00:00+00:00)""#);
        assert_eq!(serde_json::from_str::<Period>(&json).unwrap(), p);
    }
}
