use super::builder::IdGenerator;
use crate::types::{AnswerId, MediaId, PollId, ValidationError};
use indexmap::IndexMap;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Open attribute bag merged into a text block's wire form.
///
/// Keys colliding with the block's own fields (`type`, `text`, `subtype`)
/// are dropped at serialization time.
pub type TextAttributes = IndexMap<String, serde_json::Value>;

/// Text block subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextSubtype {
    #[default]
    Plain,
    Heading,
    Subheading,
    Cursive,
    Quote,
    Indented,
    Chat,
    OrderedListItem,
    UnorderedListItem,
}

impl TextSubtype {
    /// The `subtype` value sent to the platform. Plain text has none.
    pub fn wire_name(self) -> Option<&'static str> {
        match self {
            TextSubtype::Plain => None,
            TextSubtype::Heading => Some("heading1"),
            TextSubtype::Subheading => Some("heading2"),
            TextSubtype::Cursive => Some("quirky"),
            TextSubtype::Quote => Some("quote"),
            TextSubtype::Indented => Some("indented"),
            TextSubtype::Chat => Some("chat"),
            TextSubtype::OrderedListItem => Some("ordered-list-item"),
            TextSubtype::UnorderedListItem => Some("unordered-list-item"),
        }
    }
}

/// List marker style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Ordered,
    Unordered,
}

impl ListStyle {
    pub fn item_subtype(self) -> TextSubtype {
        match self {
            ListStyle::Ordered => TextSubtype::OrderedListItem,
            ListStyle::Unordered => TextSubtype::UnorderedListItem,
        }
    }
}

/// Text block
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub subtype: TextSubtype,
    pub text: String,
    pub attributes: TextAttributes,
}

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaSource {
    /// Already hosted; the platform fetches it.
    Url(Url),
    /// A local file uploaded alongside the post under `identifier`.
    File { path: PathBuf, identifier: MediaId },
}

impl MediaSource {
    /// Classify a source string. Only http(s) URLs count as remote; anything
    /// else is a local path and gets a fresh upload identifier.
    pub(crate) fn classify(source: &str, ids: &dyn IdGenerator) -> Self {
        match Url::parse(source) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => MediaSource::Url(url),
            _ => MediaSource::File {
                path: PathBuf::from(source),
                identifier: MediaId::from_uuid(ids.generate()),
            },
        }
    }
}

/// Image block
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub source: MediaSource,
    pub media_type: String,
    pub alt_text: String,
    pub caption: Option<String>,
}

impl ImageBlock {
    pub(crate) fn build(
        source: &str,
        media_type: &str,
        alt_text: &str,
        caption: Option<&str>,
        ids: &dyn IdGenerator,
    ) -> Result<Self, ValidationError> {
        if source.trim().is_empty() {
            return Err(ValidationError::EmptyField("image source"));
        }
        if media_type.trim().is_empty() {
            return Err(ValidationError::EmptyField("image media type"));
        }

        Ok(Self {
            source: MediaSource::classify(source.trim(), ids),
            media_type: media_type.trim().to_string(),
            alt_text: alt_text.to_string(),
            caption: caption.map(str::to_string),
        })
    }
}

/// A horizontal row of images, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBlock {
    pub images: Vec<ImageBlock>,
}

/// One selectable poll answer
#[derive(Debug, Clone, PartialEq)]
pub struct PollOption {
    pub text: String,
    pub option_id: AnswerId,
}

/// Poll block
///
/// `expire_after` is sent as given; the platform clamps it to 1..=7 days and
/// may echo back a different value.
#[derive(Debug, Clone, PartialEq)]
pub struct PollBlock {
    pub question: String,
    pub options: Vec<PollOption>,
    pub poll_id: PollId,
    pub expire_after: Duration,
}

impl PollBlock {
    pub fn option_ids(&self) -> impl Iterator<Item = &AnswerId> {
        self.options.iter().map(|option| &option.option_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn nil_ids() -> Uuid {
        Uuid::nil()
    }

    #[test]
    fn test_subtype_wire_names() {
        assert_eq!(TextSubtype::Plain.wire_name(), None);
        assert_eq!(TextSubtype::Heading.wire_name(), Some("heading1"));
        assert_eq!(TextSubtype::Cursive.wire_name(), Some("quirky"));
        assert_eq!(
            ListStyle::Ordered.item_subtype().wire_name(),
            Some("ordered-list-item")
        );
    }

    #[test]
    fn test_media_source_classification() {
        let remote = MediaSource::classify("https://example.com/a.png", &nil_ids);
        assert!(matches!(remote, MediaSource::Url(_)));

        let local = MediaSource::classify("pics/a.png", &nil_ids);
        match local {
            MediaSource::File { path, identifier } => {
                assert_eq!(path, PathBuf::from("pics/a.png"));
                assert_eq!(identifier.as_str(), Uuid::nil().to_string());
            }
            other => panic!("expected file source, got {:?}", other),
        }

        // Non-http schemes are not fetched remotely
        let other = MediaSource::classify("ftp://example.com/a.png", &nil_ids);
        assert!(matches!(other, MediaSource::File { .. }));
    }

    #[test]
    fn test_image_requires_media_type() {
        let err = ImageBlock::build("a.jpg", "  ", "alt", None, &nil_ids).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("image media type"));

        let err = ImageBlock::build("", "image/jpeg", "alt", None, &nil_ids).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("image source"));
    }
}
