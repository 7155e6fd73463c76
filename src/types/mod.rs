use thiserror::Error;

mod domain_types;
mod ids;

pub use domain_types::*;
pub use ids::*;

/// Local, synchronous failures raised before anything is serialized or sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Poll option count mismatch: {options} options but {ids} option ids")]
    OptionCountMismatch { options: usize, ids: usize },

    #[error("Duplicate id within poll: {0}")]
    DuplicateId(String),

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Malformed image spec: {reason}")]
    MalformedImageSpec { reason: String },

    #[error("Invalid blog name: {name} - {reason}")]
    InvalidBlogName { name: String, reason: String },

    #[error("Invalid post id: {0}")]
    InvalidPostId(String),

    #[error("Invalid access token: {reason}")]
    InvalidAccessToken { reason: String },
}
