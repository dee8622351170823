//! Error types for boxlog

use thiserror::Error;

/// Failure reported by a remote sink for a single delivery.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Text is longer than the sink accepts in one message
    #[error("message of {len} chars exceeds the limit of {max}")]
    TooLong { len: usize, max: usize },

    /// Transport-level failure (DNS, TLS, HTTP status)
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote API answered but refused the request
    #[error("rejected by remote: {0}")]
    Rejected(String),
}

/// Main error type for boxlog operations
#[derive(Error, Debug)]
pub enum BoxlogError {
    /// A record was emitted without any field; callers must pass at least one value
    #[error("contract violation: a record needs at least one field")]
    EmptyRecord,

    /// A value could not be turned into printable text
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid engine configuration or unreachable remote sink at setup
    #[error("Configuration error: {0}")]
    Config(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using BoxlogError
pub type BoxlogResult<T> = Result<T, BoxlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoxlogError::Config("width must be positive".to_string());
        assert_eq!(format!("{}", err), "Configuration error: width must be positive");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BoxlogError = io_err.into();
        assert!(matches!(err, BoxlogError::Io(_)));
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::TooLong { len: 5000, max: 4096 };
        assert_eq!(err.to_string(), "message of 5000 chars exceeds the limit of 4096");
    }
}
