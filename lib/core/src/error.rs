use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Registration validation
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Select between {min} and {max} interests, got {actual}")]
    InterestCount { min: usize, max: usize, actual: usize },

    #[error("Unknown interest: {0}")]
    UnknownInterest(String),

    #[error("Interest selected twice: {0}")]
    DuplicateInterest(String),

    // Partitioning preconditions
    #[error("No registrations found")]
    NoRegistrations,

    #[error("Not enough participants to assign tables: need at least {required}, got {actual}")]
    TooFewParticipants { required: usize, actual: usize },

    #[error("Invalid table count: {tables} (must be between 2 and {participants})")]
    InvalidTableCount { tables: usize, participants: usize },

    #[error("Invalid table capacity: {capacity} (must be between 1 and {participants})")]
    InvalidCapacity { capacity: usize, participants: usize },

    // Stored data integrity
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Vocabulary mismatch in column {column}: expected '{expected}', found '{found}'")]
    VocabularyMismatch {
        column: usize,
        expected: String,
        found: String,
    },

    #[error("Invalid interest value '{value}' at line {line}, column '{column}' (expected 0 or 1)")]
    InvalidInterestCell {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Rejected registration input. Nothing was written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::DuplicateEmail(_)
                | Error::MissingField(_)
                | Error::InterestCount { .. }
                | Error::UnknownInterest(_)
                | Error::DuplicateInterest(_)
        )
    }

    /// Partitioning refused to run with the given data or parameters.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::NoRegistrations
                | Error::TooFewParticipants { .. }
                | Error::InvalidTableCount { .. }
                | Error::InvalidCapacity { .. }
        )
    }

    /// Stored data does not match the configured vocabulary or format.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Error::InvalidDimension { .. }
                | Error::VocabularyMismatch { .. }
                | Error::InvalidInterestCell { .. }
                | Error::MalformedRecord { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert!(Error::DuplicateEmail("a@b.c".into()).is_validation());
        assert!(Error::NoRegistrations.is_precondition());
        assert!(!Error::NoRegistrations.is_validation());
        assert!(Error::InvalidInterestCell {
            line: 2,
            column: "Fintech".into(),
            value: "x".into(),
        }
        .is_data_integrity());
        assert!(!Error::Storage("disk".into()).is_data_integrity());
    }
}
