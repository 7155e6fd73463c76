// src/error.rs
//! Application error types with structured error handling.
//!
//! Validation failures are raised locally before anything is serialized.
//! Serialization failures indicate a programming error. Everything the
//! transport reports is carried through without retry.

use thiserror::Error;

/// Failure to turn a block sequence into its wire representation.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("Block kind '{kind}' has no wire representation: {reason}")]
    UnsupportedBlock { kind: String, reason: String },

    #[error("Failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Tumblr API returned an error ({status}): {message}")]
    TumblrService { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Post {post_id} contains no poll")]
    NoPollInPost { post_id: String },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl AppError {
    /// Whether the platform reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::TumblrService { status: 404, .. })
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationError;

    #[test]
    fn test_validation_error_passes_through() {
        let err: AppError = ValidationError::OptionCountMismatch { options: 3, ids: 2 }.into();
        assert_eq!(
            err.to_string(),
            "Poll option count mismatch: 3 options but 2 option ids"
        );
    }

    #[test]
    fn test_service_error_display() {
        let err = AppError::TumblrService {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "Tumblr API returned an error (404): Not Found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unsupported_block_display() {
        let err = SerializationError::UnsupportedBlock {
            kind: "row".to_string(),
            reason: "row holds no images".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Block kind 'row' has no wire representation: row holds no images"
        );
    }
}
