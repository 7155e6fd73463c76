// src/api/wire.rs
//! Neue Post Format shapes for each block kind.
//!
//! Encoding is a pure read of the block: ids were fixed when the block was
//! built, so encoding the same blocks twice yields identical JSON.

use crate::constants::POLL_CLOSE_STATUS;
use crate::error::SerializationError;
use crate::model::{Block, ImageBlock, MediaSource, PollBlock, PollOption, TextBlock};
use crate::types::{AnswerId, PollId, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Text fields owned by the block itself; attribute entries never override them.
const RESERVED_TEXT_KEYS: [&str; 3] = ["type", "text", "subtype"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAnswer {
    pub answer_text: String,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePollSettings {
    #[serde(default = "default_close_status")]
    pub close_status: String,
    pub expire_after: u64,
}

fn default_close_status() -> String {
    POLL_CLOSE_STATUS.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePoll {
    pub question: String,
    pub client_id: String,
    pub answers: Vec<WireAnswer>,
    pub settings: WirePollSettings,
}

impl From<&PollBlock> for WirePoll {
    fn from(poll: &PollBlock) -> Self {
        Self {
            question: poll.question.clone(),
            client_id: poll.poll_id.to_string(),
            answers: poll
                .options
                .iter()
                .map(|option| WireAnswer {
                    answer_text: option.text.clone(),
                    client_id: option.option_id.to_string(),
                })
                .collect(),
            settings: WirePollSettings {
                close_status: POLL_CLOSE_STATUS.to_string(),
                expire_after: poll.expire_after.as_secs(),
            },
        }
    }
}

impl TryFrom<WirePoll> for PollBlock {
    type Error = ValidationError;

    fn try_from(wire: WirePoll) -> Result<Self, Self::Error> {
        Ok(PollBlock {
            question: wire.question,
            options: wire
                .answers
                .into_iter()
                .map(|answer| {
                    Ok(PollOption {
                        text: answer.answer_text,
                        option_id: AnswerId::new(answer.client_id)?,
                    })
                })
                .collect::<Result<Vec<_>, Self::Error>>()?,
            poll_id: PollId::new(wire.client_id)?,
            expire_after: Duration::from_secs(wire.settings.expire_after),
        })
    }
}

#[derive(Debug, Serialize)]
struct WireMedia<'a> {
    #[serde(rename = "type")]
    media_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<&'a str>,
    alt_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<&'a str>,
}

impl<'a> From<&'a ImageBlock> for WireMedia<'a> {
    fn from(image: &'a ImageBlock) -> Self {
        let (url, identifier) = match &image.source {
            MediaSource::Url(url) => (Some(url.as_str()), None),
            MediaSource::File { identifier, .. } => (None, Some(identifier.as_str())),
        };
        Self {
            media_type: &image.media_type,
            url,
            identifier,
            alt_text: &image.alt_text,
            caption: image.caption.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireBlock<'a> {
    Image { media: Vec<WireMedia<'a>> },
    Poll(WirePoll),
}

/// Encode one block. `Ok(None)` means the block only affects layout.
pub fn encode_block(block: &Block) -> Result<Option<Value>, SerializationError> {
    let wire = match block {
        Block::Text(text) => return Ok(Some(encode_text(text))),
        Block::ReadMore => return Ok(None),
        Block::Image(image) => WireBlock::Image {
            media: vec![WireMedia::from(image)],
        },
        Block::Row(row) if row.images.is_empty() => {
            return Err(SerializationError::UnsupportedBlock {
                kind: block.kind().to_string(),
                reason: "row holds no images".to_string(),
            })
        }
        Block::Row(row) => WireBlock::Image {
            media: row.images.iter().map(WireMedia::from).collect(),
        },
        Block::Poll(poll) => WireBlock::Poll(WirePoll::from(poll)),
    };

    serde_json::to_value(&wire)
        .map(Some)
        .map_err(|source| SerializationError::Encode {
            what: block.kind(),
            source,
        })
}

fn encode_text(text: &TextBlock) -> Value {
    let mut map: Map<String, Value> = text
        .attributes
        .iter()
        .filter(|(key, _)| {
            let reserved = RESERVED_TEXT_KEYS.contains(&key.as_str());
            if reserved {
                log::warn!("Ignoring text attribute '{}' that shadows a block field", key);
            }
            !reserved
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    map.insert("type".to_string(), Value::from("text"));
    map.insert("text".to_string(), Value::from(text.text.as_str()));
    if let Some(subtype) = text.subtype.wire_name() {
        map.insert("subtype".to_string(), Value::from(subtype));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBuilder, TextAttributes, TextSubtype};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    fn nil() -> Uuid {
        Uuid::nil()
    }

    #[test]
    fn test_plain_text_has_no_subtype() {
        let mut builder = ContentBuilder::new();
        builder.text("hello");
        let wire = encode_block(&builder.build()[0]).unwrap();
        assert_eq!(wire, Some(json!({"type": "text", "text": "hello"})));
    }

    #[test]
    fn test_fixed_fields_win_over_attributes() {
        let mut attributes = TextAttributes::new();
        attributes.insert("type".to_string(), json!("poll"));
        attributes.insert("text".to_string(), json!("hijacked"));
        attributes.insert("subtype".to_string(), json!("heading2"));
        attributes.insert("indent_level".to_string(), json!(2));

        let mut builder = ContentBuilder::new();
        builder.styled_text(TextSubtype::Quote, "kept", attributes);

        let wire = encode_block(&builder.build()[0]).unwrap().unwrap();
        assert_eq!(
            wire,
            json!({"type": "text", "text": "kept", "subtype": "quote", "indent_level": 2})
        );
    }

    #[test]
    fn test_image_media_entry() {
        let mut builder = ContentBuilder::with_id_generator(nil);
        builder
            .image("https://e.com/a.png", "image/png", "a cat", Some("my cat"))
            .unwrap()
            .image("local/b.png", "image/png", "", None)
            .unwrap();

        let blocks = builder.build();
        assert_eq!(
            encode_block(&blocks[0]).unwrap().unwrap(),
            json!({"type": "image", "media": [{
                "type": "image/png",
                "url": "https://e.com/a.png",
                "alt_text": "a cat",
                "caption": "my cat"
            }]})
        );
        assert_eq!(
            encode_block(&blocks[1]).unwrap().unwrap(),
            json!({"type": "image", "media": [{
                "type": "image/png",
                "identifier": Uuid::nil().to_string(),
                "alt_text": ""
            }]})
        );
    }

    #[test]
    fn test_poll_shape() {
        let mut builder = ContentBuilder::new();
        builder
            .poll_with(
                "Best?",
                ["A", "B"],
                crate::model::PollSettings::default()
                    .poll_id("p1")
                    .option_ids(["a1", "a2"])
                    .expire_after(Duration::from_secs(86_400)),
            )
            .unwrap();

        assert_eq!(
            encode_block(&builder.build()[0]).unwrap().unwrap(),
            json!({
                "type": "poll",
                "question": "Best?",
                "client_id": "p1",
                "answers": [
                    {"answer_text": "A", "client_id": "a1"},
                    {"answer_text": "B", "client_id": "a2"}
                ],
                "settings": {"close_status": "closed-after", "expire_after": 86400}
            })
        );
    }

    #[test]
    fn test_read_more_has_no_content_entry() {
        assert_eq!(encode_block(&Block::ReadMore).unwrap(), None);
    }

    #[test]
    fn test_empty_row_is_unsupported() {
        let block = Block::Row(crate::model::RowBlock { images: vec![] });
        let err = encode_block(&block).unwrap_err();
        assert!(matches!(err, SerializationError::UnsupportedBlock { .. }));
    }

    #[test]
    fn test_wire_poll_decodes_back() {
        let wire: WirePoll = serde_json::from_value(json!({
            "question": "Q",
            "client_id": "p",
            "answers": [{"answer_text": "A", "client_id": "a"}],
            "settings": {"expire_after": 172800}
        }))
        .unwrap();
        assert_eq!(wire.settings.close_status, "closed-after");

        let poll = PollBlock::try_from(wire).unwrap();
        assert_eq!(poll.poll_id.as_str(), "p");
        assert_eq!(poll.options[0].option_id.as_str(), "a");
        assert_eq!(poll.expire_after, Duration::from_secs(172_800));
    }
}
