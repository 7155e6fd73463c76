//! Loosely-shaped image descriptions accepted by `ContentBuilder::row_of`.
//!
//! Callers may describe an image either by named fields or positionally as
//! `(source, media type, alt text[, caption])`. Both forms go through
//! [`ImageSpec::normalize`]; anything that does not fit is rejected rather
//! than coerced.

use super::blocks::ImageBlock;
use super::builder::IdGenerator;
use crate::types::ValidationError;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSpec {
    NamedFields(IndexMap<String, String>),
    PositionalTuple(Vec<String>),
}

impl ImageSpec {
    pub fn named<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        ImageSpec::NamedFields(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn positional<V: Into<String>>(values: impl IntoIterator<Item = V>) -> Self {
        ImageSpec::PositionalTuple(values.into_iter().map(Into::into).collect())
    }

    pub(crate) fn normalize(&self, ids: &dyn IdGenerator) -> Result<ImageBlock, ValidationError> {
        match self {
            ImageSpec::NamedFields(fields) => normalize_named(fields, ids),
            ImageSpec::PositionalTuple(values) => normalize_positional(values, ids),
        }
    }
}

fn normalize_positional(
    values: &[String],
    ids: &dyn IdGenerator,
) -> Result<ImageBlock, ValidationError> {
    match values {
        [source, media_type, alt_text] => {
            ImageBlock::build(source, media_type, alt_text, None, ids)
        }
        [source, media_type, alt_text, caption] => {
            ImageBlock::build(source, media_type, alt_text, Some(caption.as_str()), ids)
        }
        other => Err(ValidationError::MalformedImageSpec {
            reason: format!(
                "positional spec needs 3 or 4 values (source, media type, alt text[, caption]), got {}",
                other.len()
            ),
        }),
    }
}

fn normalize_named(
    fields: &IndexMap<String, String>,
    ids: &dyn IdGenerator,
) -> Result<ImageBlock, ValidationError> {
    let mut source = None;
    let mut media_type = None;
    let mut alt_text = None;
    let mut caption = None;

    for (key, value) in fields {
        let slot = match key.as_str() {
            "source" => &mut source,
            "mediaType" | "media_type" => &mut media_type,
            "altText" | "alt_text" => &mut alt_text,
            "caption" => &mut caption,
            unknown => {
                return Err(ValidationError::MalformedImageSpec {
                    reason: format!("unknown field '{}'", unknown),
                })
            }
        };
        if slot.replace(value.as_str()).is_some() {
            return Err(ValidationError::MalformedImageSpec {
                reason: format!("field '{}' given more than once", key),
            });
        }
    }

    ImageBlock::build(
        required(source, "source")?,
        required(media_type, "mediaType")?,
        required(alt_text, "altText")?,
        caption,
        ids,
    )
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ValidationError> {
    value.ok_or_else(|| ValidationError::MalformedImageSpec {
        reason: format!("missing required field '{}'", name),
    })
}

impl From<(&str, &str, &str)> for ImageSpec {
    fn from((source, media_type, alt_text): (&str, &str, &str)) -> Self {
        ImageSpec::positional([source, media_type, alt_text])
    }
}

impl From<(&str, &str, &str, &str)> for ImageSpec {
    fn from((source, media_type, alt_text, caption): (&str, &str, &str, &str)) -> Self {
        ImageSpec::positional([source, media_type, alt_text, caption])
    }
}

impl<const N: usize> From<[(&str, &str); N]> for ImageSpec {
    fn from(fields: [(&str, &str); N]) -> Self {
        ImageSpec::named(fields)
    }
}
