//! Error types.

use std::fmt;

use thiserror::Error as ThisError;

/// Why an exhaustive search was stopped before completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The configured deadline elapsed.
    Deadline,
    /// The configured number of evaluated tours was reached.
    TourLimit,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deadline => write!(f, "deadline elapsed"),
            Self::TourLimit => write!(f, "tour limit reached"),
        }
    }
}

/// Errors produced while stratifying stops or searching for a route.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Empty stop list, unrecognized priority label, misplaced depot,
    /// or non-finite coordinates.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The search hit a configured limit. No partial route is produced.
    #[error("search aborted after {evaluated} tours: {reason}")]
    SearchAborted {
        /// Tours fully or partially evaluated before stopping.
        evaluated: u64,
        /// Which limit was hit.
        reason: AbortReason,
    },
    /// Reading from or writing to the interactive terminal failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns `true` for [`Error::InvalidInput`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let e = Error::invalid_input("stop list is empty");
        assert!(e.is_invalid_input());
        assert_eq!(e.to_string(), "invalid input: stop list is empty");
    }

    #[test]
    fn test_search_aborted_message() {
        let e = Error::SearchAborted {
            evaluated: 120,
            reason: AbortReason::TourLimit,
        };
        assert!(!e.is_invalid_input());
        assert_eq!(e.to_string(), "search aborted after 120 tours: tour limit reached");
    }
}
