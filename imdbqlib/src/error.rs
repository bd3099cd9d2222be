//! Error types for imdbqlib

use thiserror::Error;

/// Broad classification of a failure, for callers that branch on the
/// category rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The database driver or its runtime could not be brought up
    DriverUnavailable,
    /// Bad credentials, host, port or database name
    ConnectionFailed,
    /// Malformed SQL, type mismatch or an I/O error while fetching
    QueryFailed,
    /// Configuration or parameter rejected before touching the database
    InvalidInput,
}

/// Errors that can occur while running a lookup
#[derive(Error, Debug)]
pub enum ImdbqError {
    /// The driver runtime could not be started
    #[error("database driver unavailable: {0}")]
    DriverUnavailable(String),

    /// Failed to open a connection
    #[error("failed to connect to '{target}': {source}")]
    ConnectionFailed {
        target: String,
        source: sqlx::Error,
    },

    /// A statement failed to prepare, execute or fetch
    #[error("query '{query}' failed: {source}")]
    QueryFailed {
        query: String,
        source: sqlx::Error,
    },

    /// Connection settings are unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A lookup parameter could not be bound
    #[error("invalid parameter for {query}: {message}")]
    InvalidParameter { query: String, message: String },
}

impl ImdbqError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImdbqError::DriverUnavailable(_) => ErrorKind::DriverUnavailable,
            ImdbqError::ConnectionFailed { .. } => ErrorKind::ConnectionFailed,
            ImdbqError::QueryFailed { .. } => ErrorKind::QueryFailed,
            ImdbqError::InvalidConfig(_) | ImdbqError::InvalidParameter { .. } => {
                ErrorKind::InvalidInput
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = ImdbqError::DriverUnavailable("no runtime".to_string());
        assert_eq!(err.kind(), ErrorKind::DriverUnavailable);

        let err = ImdbqError::ConnectionFailed {
            target: "postgresql://localhost:5432/imdb".to_string(),
            source: sqlx::Error::PoolTimedOut,
        };
        assert_eq!(err.kind(), ErrorKind::ConnectionFailed);

        let err = ImdbqError::QueryFailed {
            query: "titles by year".to_string(),
            source: sqlx::Error::RowNotFound,
        };
        assert_eq!(err.kind(), ErrorKind::QueryFailed);

        let err = ImdbqError::InvalidConfig("empty user".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_messages_name_the_target() {
        let err = ImdbqError::ConnectionFailed {
            target: "postgresql://localhost:5432/imdb".to_string(),
            source: sqlx::Error::PoolTimedOut,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to connect to 'postgresql://localhost:5432/imdb'"));

        let err = ImdbqError::InvalidParameter {
            query: "titles by year".to_string(),
            message: "'abc' is not a year".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter for titles by year: 'abc' is not a year"
        );
    }
}
