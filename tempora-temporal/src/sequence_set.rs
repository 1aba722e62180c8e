use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use tempora_core::{Interpolation, Result, TemporalDuration, TemporalError};
use tempora_time::{Period, PeriodSet, Timestamp};

use crate::base::BaseValue;
use crate::instant::Instant;
use crate::parser::{LiteralParser, STEP_MARKER};
use crate::sequence::{needs_step_marker, Sequence};
use crate::temporal::Temporal;

/// A value defined over several disjoint sequences.
///
/// Sequences are never merged: two members that share a time point are
/// rejected, while members touching at a bound that only one of them
/// includes are kept apart.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSet<V> {
    sequences: Vec<Sequence<V>>,
}

impl<V: BaseValue> SequenceSet<V> {
    pub fn new(sequences: impl IntoIterator<Item = Sequence<V>>) -> Result<Self> {
        let mut sequences: Vec<Sequence<V>> = sequences.into_iter().collect();
        let interpolation = match sequences.first() {
            Some(first) => first.interpolation(),
            None => return Err(TemporalError::Empty("sequence set")),
        };
        if sequences
            .iter()
            .any(|sequence| sequence.interpolation() != interpolation)
        {
            return Err(TemporalError::MixedInterpolation);
        }

        sequences.sort_by(|a, b| a.period().cmp_start(&b.period()));
        if let Some(pair) = sequences
            .windows(2)
            .find(|pair| pair[0].period().overlaps(&pair[1].period()))
        {
            return Err(TemporalError::OverlappingSequences(format!(
                "{} and {}",
                pair[0].period(),
                pair[1].period()
            )));
        }

        Ok(Self { sequences })
    }

    pub fn sequences(&self) -> &[Sequence<V>] {
        &self.sequences
    }

    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    pub fn start_sequence(&self) -> &Sequence<V> {
        &self.sequences[0]
    }

    pub fn end_sequence(&self) -> &Sequence<V> {
        &self.sequences[self.sequences.len() - 1]
    }

    /// 1-based access.
    pub fn sequence_n(&self, n: usize) -> Result<&Sequence<V>> {
        let idx = TemporalError::check_index(n, self.sequences.len())?;
        Ok(&self.sequences[idx])
    }

    pub fn interpolation(&self) -> Interpolation {
        self.start_sequence().interpolation()
    }

    fn sequence_at(&self, timestamp: &Timestamp) -> Option<&Sequence<V>> {
        let idx = self
            .sequences
            .partition_point(|sequence| sequence.period().upper() < *timestamp);
        self.sequences[idx..]
            .iter()
            .take_while(|sequence| sequence.period().lower() <= *timestamp)
            .find(|sequence| sequence.period().contains_timestamp(timestamp))
    }
}

impl<V: BaseValue> Temporal<V> for SequenceSet<V> {
    fn duration(&self) -> TemporalDuration {
        TemporalDuration::SequenceSet
    }

    fn time(&self) -> PeriodSet {
        PeriodSet::new(self.sequences.iter().map(Sequence::period))
    }

    fn period(&self) -> Period {
        self.start_sequence()
            .period()
            .span(&self.end_sequence().period())
    }

    fn start_instant(&self) -> &Instant<V> {
        self.start_sequence().start_instant()
    }

    fn end_instant(&self) -> &Instant<V> {
        self.end_sequence().end_instant()
    }

    /// Instants of all sequences in time order; an instant repeated at the
    /// junction of two sequences is listed once.
    fn instants(&self) -> Vec<&Instant<V>> {
        let mut instants: Vec<&Instant<V>> = Vec::new();
        for instant in self.sequences.iter().flat_map(Sequence::as_slice) {
            if instants.last() != Some(&instant) {
                instants.push(instant);
            }
        }
        instants
    }

    fn shift(&self, delta: Duration) -> Result<Self> {
        let sequences = self
            .sequences
            .iter()
            .map(|sequence| sequence.shift(delta))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { sequences })
    }

    fn value_at_timestamp(&self, timestamp: &Timestamp) -> Option<V> {
        self.sequence_at(timestamp)?.value_at_timestamp(timestamp)
    }
}

impl<V: BaseValue> fmt::Display for SequenceSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_step_marker::<V>(self.interpolation()) {
            f.write_str(STEP_MARKER)?;
        }
        f.write_str("{")?;
        for (idx, sequence) in self.sequences.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            sequence.fmt_body(f)?;
        }
        f.write_str("}")
    }
}

impl<V: BaseValue> FromStr for SequenceSet<V> {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self> {
        LiteralParser::default().parse_sequence_set(s)
    }
}
