// src/api/client.rs
//! reqwest-backed transport for the Tumblr v2 API.
//!
//! This module only signs and sends requests. Bodies come pre-assembled in a
//! [`RequestDescription`]; responses are handed to the parser untouched.

use super::parser::parse_body;
use super::request::{Attachment, Method, RequestDescription};
use crate::constants::TUMBLR_API_BASE_URL;
use crate::error::{AppError, SerializationError};
use crate::types::AccessToken;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client};
use serde_json::Value;

/// A thin wrapper around reqwest Client for Tumblr API requests.
#[derive(Clone)]
pub struct TumblrHttpClient {
    client: Client,
    base_url: String,
}

impl TumblrHttpClient {
    /// Creates a new HTTP client authenticating with an OAuth2 bearer token.
    pub fn new(token: &AccessToken) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: TUMBLR_API_BASE_URL.to_string(),
        })
    }

    /// Point the client at another API root, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn create_headers(token: &AccessToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid access token format: {}", e))
            })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        Ok(headers)
    }

    fn url_for(&self, request: &RequestDescription) -> String {
        format!("{}/{}", self.base_url, request.route)
    }
}

/// Builds a `multipart/form-data` body: the JSON post under `json`, then one
/// part per local file named by its media identifier.
async fn multipart_form(body: &Value, attachments: &[Attachment]) -> Result<Form, AppError> {
    let json = serde_json::to_string(body).map_err(|source| SerializationError::Encode {
        what: "post body",
        source,
    })?;
    let mut form = Form::new().part("json", Part::text(json).mime_str("application/json")?);

    for attachment in attachments {
        let bytes = tokio::fs::read(&attachment.path).await?;
        let name = attachment.identifier.to_string();
        let part = Part::bytes(bytes)
            .file_name(name.clone())
            .mime_str(&attachment.media_type)?;
        form = form.part(name, part);
    }

    Ok(form)
}

#[async_trait::async_trait]
impl super::Transport for TumblrHttpClient {
    async fn execute(&self, request: &RequestDescription) -> Result<Value, AppError> {
        let url = self.url_for(request);
        log::debug!("{} {}", request.method.as_str(), url);

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => {
                let body = request.body.clone().unwrap_or(Value::Null);
                if request.attachments.is_empty() {
                    self.client.post(&url).json(&body)
                } else {
                    log::debug!("Uploading {} attachment(s)", request.attachments.len());
                    let form = multipart_form(&body, &request.attachments).await?;
                    self.client.post(&url).multipart(form)
                }
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        log::debug!("{} -> {}", url, status);

        let text = response.text().await?;
        parse_body(status.as_u16(), &text, &url)
    }
}
