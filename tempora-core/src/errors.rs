use thiserror::Error;

/// Result type used across the tempora crates.
pub type Result<T> = std::result::Result<T, TemporalError>;

/// Canonical error representation shared by every tempora crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    #[error("malformed literal at position {position}: expected {expected}")]
    MalformedLiteral { position: usize, expected: String },

    #[error("malformed timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    #[error("duplicate timestamp: {0}")]
    DuplicateTimestamp(String),

    #[error("timestamps must be strictly increasing: {0}")]
    NonMonotonicTime(String),

    #[error("overlapping sequences: {0}")]
    OverlappingSequences(String),

    #[error("index {index} out of range 1..={len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("values of type {0} have no total order")]
    NotComparable(&'static str),

    #[error("{0} requires at least one element")]
    Empty(&'static str),

    #[error("{interpolation} interpolation is not supported for {base} values")]
    UnsupportedInterpolation {
        interpolation: String,
        base: &'static str,
    },

    #[error("sequences in a set must share one interpolation")]
    MixedInterpolation,

    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("general error: {0}")]
    GeneralError(String),
}

impl TemporalError {
    pub fn malformed(position: usize, expected: impl Into<String>) -> Self {
        TemporalError::MalformedLiteral {
            position,
            expected: expected.into(),
        }
    }

    /// Checks a 1-based index against a collection length.
    pub fn check_index(index: usize, len: usize) -> Result<usize> {
        if index == 0 || index > len {
            Err(TemporalError::IndexOutOfRange { index, len })
        } else {
            Ok(index - 1)
        }
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for environment variable {key}")]
    InvalidEnvVar { key: String, value: String },
}

impl From<ConfigError> for TemporalError {
    fn from(value: ConfigError) -> Self {
        TemporalError::ConfigError(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_check_is_one_based() {
        assert_eq!(TemporalError::check_index(1, 3), Ok(0));
        assert_eq!(TemporalError::check_index(3, 3), Ok(2));
        assert_eq!(
            TemporalError::check_index(0, 3),
            Err(TemporalError::IndexOutOfRange { index: 0, len: 3 })
        );
        assert!(TemporalError::check_index(4, 3).is_err());
    }

    #[test]
    fn config_errors_convert() {
        let err: TemporalError = ConfigError::InvalidEnvVar {
            key: "TEMPORA_X".into(),
            value: "nope".into(),
        }
        .into();
        assert!(matches!(&err, TemporalError::ConfigError(msg) if msg.contains("TEMPORA_X")));
    }
}
