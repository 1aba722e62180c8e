use std::fmt;

use serde::{Deserialize, Serialize};

/// Shape classifier of a temporal value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TemporalDuration {
    Instant,
    InstantSet,
    Sequence,
    SequenceSet,
}

impl TemporalDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalDuration::Instant => "Instant",
            TemporalDuration::InstantSet => "InstantSet",
            TemporalDuration::Sequence => "Sequence",
            TemporalDuration::SequenceSet => "SequenceSet",
        }
    }
}

impl fmt::Display for TemporalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a sequence is understood between two consecutive samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// The last sample holds until the next one.
    Step,
    /// Values vary linearly between samples.
    Linear,
}

impl Interpolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolation::Step => "Stepwise",
            Interpolation::Linear => "Linear",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
