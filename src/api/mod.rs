// src/api/mod.rs
//! Tumblr API interaction.
//!
//! Wire encoding and request assembly are pure; the only I/O goes through
//! the [`Transport`] trait so callers and tests can supply their own.

pub mod client;
pub mod parser;
pub mod request;
mod tumblr;
pub mod wire;

use crate::error::AppError;
use serde_json::Value;

/// The ability to execute a described request and return its JSON body.
///
/// Implementations own authentication and HTTP details. Failures are
/// returned as-is; callers above this seam never retry.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &request::RequestDescription) -> Result<Value, AppError>;
}

#[async_trait::async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: &request::RequestDescription) -> Result<Value, AppError> {
        (**self).execute(request).await
    }
}

// Re-export the public interface
pub use client::TumblrHttpClient;
pub use request::{Attachment, Method, PathParams, PostPayload, RequestAssembler, RequestDescription};
pub use tumblr::{ReblogTarget, TumblrClient};
