use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Strong typing for client-side ids with phantom types
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnswerMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaMarker;

/// The `client_id` of a poll block.
pub type PollId = Id<PollMarker>;
/// The `client_id` of a single poll answer.
pub type AnswerId = Id<AnswerMarker>;
/// The upload identifier tying a media entry to its multipart part.
pub type MediaId = Id<MediaMarker>;

impl<T> Id<T> {
    /// Wrap a caller-supplied id. Any non-blank string is accepted; the
    /// platform only requires the value to be unique within its poll.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }
        Ok(Self::from_normalized(value))
    }

    pub(crate) fn from_normalized(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Wrap a generated UUID using its hyphenated form.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self::from_normalized(uuid.hyphenated().to_string())
    }

    /// Create a new random v4 UUID ID
    pub fn new_v4() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether the id is a syntactically valid version-4 UUID.
    pub fn is_uuid_v4(&self) -> bool {
        Uuid::parse_str(&self.value)
            .map(|uuid| uuid.get_version_num() == 4)
            .unwrap_or(false)
    }
}

// Manual impl: a derive would demand `T: Clone` on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::from_normalized(self.value.clone())
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
