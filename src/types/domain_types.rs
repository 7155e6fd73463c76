// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// OAuth2 bearer token for the Tumblr API
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token with validation
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();

        if token.trim().is_empty() {
            return Err(ValidationError::InvalidAccessToken {
                reason: "access token cannot be empty".to_string(),
            });
        }

        if token.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidAccessToken {
                reason: "access token cannot contain whitespace".to_string(),
            });
        }

        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact token in display
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "{}...", prefix)
    }
}

/// A blog identifier: either a short name (`staff`) or a hostname
/// (`staff.tumblr.com`, `example.com`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogName(String);

impl BlogName {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::InvalidBlogName {
                name,
                reason: "blog name cannot be empty".to_string(),
            });
        }

        let bad = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.' || *c == '_'));
        let normalized = trimmed.to_string();

        if let Some(bad) = bad {
            return Err(ValidationError::InvalidBlogName {
                reason: format!("unexpected character '{}'", bad),
                name,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric post id, kept as a string so it round-trips through routes verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidPostId(input.to_string()));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as a number, as the reblog body expects it.
    pub fn as_u64(&self) -> Result<u64, ValidationError> {
        self.0
            .parse()
            .map_err(|_| ValidationError::InvalidPostId(self.0.clone()))
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_validation() {
        assert!(AccessToken::new("abc123").is_ok());
        assert!(AccessToken::new("").is_err());
        assert!(AccessToken::new("abc 123").is_err());
    }

    #[test]
    fn test_access_token_redacted() {
        let token = AccessToken::new("supersecret").unwrap();
        assert_eq!(token.to_string(), "supe...");
        assert_eq!(format!("{:?}", token), "AccessToken(..)");
    }

    #[test]
    fn test_blog_name_accepts_hostnames() {
        assert_eq!(BlogName::new(" staff ").unwrap().as_str(), "staff");
        assert!(BlogName::new("staff.tumblr.com").is_ok());
        assert!(BlogName::new("").is_err());
        assert!(BlogName::new("bad/blog").is_err());
    }

    #[test]
    fn test_post_id_parsing() {
        let id = PostId::parse("712345678901234567").unwrap();
        assert_eq!(id.as_u64().unwrap(), 712345678901234567);
        assert!(PostId::parse("12a").is_err());
        assert!(PostId::parse("").is_err());
        assert_eq!(PostId::from(42).as_str(), "42");
    }
}
