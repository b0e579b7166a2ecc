//! Crate-wide error type.
//!
//! Permutation, tour, and degenerate-input errors are contract violations:
//! they abort the run and are never retried. [`TspError::Load`] and
//! [`TspError::Io`] are the only conditions a driver is expected to
//! recover from (a missing or malformed city file).

use std::path::PathBuf;

/// Errors produced by the tour search engine.
#[derive(Debug, thiserror::Error)]
pub enum TspError {
    /// A sequence that must be a permutation of `1..=len` is not one.
    #[error("invalid permutation of length {len}: {reason}")]
    InvalidPermutation { len: usize, reason: String },

    /// Fitness evaluation was handed a malformed tour.
    #[error("invalid tour of length {len}: {reason}")]
    InvalidTour { len: usize, reason: String },

    /// The tour is too short for the operator's cut-point ranges.
    #[error("{operator} needs at least {min} cities, got {len}")]
    DegenerateInput {
        operator: &'static str,
        len: usize,
        min: usize,
    },

    /// Run parameters rejected by [`GaConfig::validate`](crate::ga::GaConfig::validate).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A line of the city file could not be parsed.
    #[error("line {line}: {message}")]
    Load { line: usize, message: String },

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_message() {
        let err = TspError::DegenerateInput {
            operator: "segment substitution crossover",
            len: 2,
            min: 3,
        };
        assert_eq!(
            err.to_string(),
            "segment substitution crossover needs at least 3 cities, got 2"
        );
    }

    #[test]
    fn test_load_message_names_line() {
        let err = TspError::Load {
            line: 7,
            message: "expected a label and two coordinates".into(),
        };
        assert!(err.to_string().starts_with("line 7:"));
    }
}
