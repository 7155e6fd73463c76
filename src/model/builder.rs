//! Fluent accumulation of post content.
//!
//! A [`ContentBuilder`] owns an insertion-ordered list of blocks and only
//! grows through its append methods. Poll and media identifiers are drawn
//! from an injected [`IdGenerator`] so that tests can make them
//! deterministic. The builder is not internally synchronized.

use super::block::Block;
use super::blocks::{
    ImageBlock, ListStyle, PollBlock, PollOption, RowBlock, TextAttributes, TextBlock,
    TextSubtype,
};
use super::image_spec::ImageSpec;
use crate::constants::DEFAULT_POLL_EXPIRY;
use crate::types::{AnswerId, PollId, ValidationError};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Source of fresh identifiers for polls, poll answers and uploads.
pub trait IdGenerator {
    fn generate(&self) -> Uuid;
}

impl<F> IdGenerator for F
where
    F: Fn() -> Uuid,
{
    fn generate(&self) -> Uuid {
        self()
    }
}

/// Optional poll parameters. Defaults to a seven day expiry with generated ids.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    pub expire_after: Duration,
    pub poll_id: Option<String>,
    pub option_ids: Option<Vec<String>>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            expire_after: DEFAULT_POLL_EXPIRY,
            poll_id: None,
            option_ids: None,
        }
    }
}

impl PollSettings {
    pub fn expire_after(mut self, duration: Duration) -> Self {
        self.expire_after = duration;
        self
    }

    pub fn poll_id(mut self, id: impl Into<String>) -> Self {
        self.poll_id = Some(id.into());
        self
    }

    pub fn option_ids<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.option_ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

pub struct ContentBuilder {
    blocks: Vec<Block>,
    ids: Box<dyn IdGenerator + Send + Sync>,
}

impl Default for ContentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentBuilder")
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}

impl ContentBuilder {
    /// A builder drawing random v4 UUIDs.
    pub fn new() -> Self {
        Self::with_id_generator(Uuid::new_v4)
    }

    pub fn with_id_generator(ids: impl IdGenerator + Send + Sync + 'static) -> Self {
        Self {
            blocks: Vec::new(),
            ids: Box::new(ids),
        }
    }

    /// Append a text block of any subtype, carrying extra wire attributes.
    pub fn styled_text(
        &mut self,
        subtype: TextSubtype,
        content: impl Into<String>,
        attributes: TextAttributes,
    ) -> &mut Self {
        self.blocks.push(Block::Text(TextBlock {
            subtype,
            text: content.into(),
            attributes,
        }));
        self
    }

    pub fn text(&mut self, content: impl Into<String>) -> &mut Self {
        self.text_with(content, TextAttributes::new())
    }

    pub fn heading(&mut self, content: impl Into<String>) -> &mut Self {
        self.heading_with(content, TextAttributes::new())
    }

    pub fn subheading(&mut self, content: impl Into<String>) -> &mut Self {
        self.subheading_with(content, TextAttributes::new())
    }

    pub fn cursive(&mut self, content: impl Into<String>) -> &mut Self {
        self.cursive_with(content, TextAttributes::new())
    }

    pub fn quote(&mut self, content: impl Into<String>) -> &mut Self {
        self.quote_with(content, TextAttributes::new())
    }

    pub fn indented(&mut self, content: impl Into<String>) -> &mut Self {
        self.indented_with(content, TextAttributes::new())
    }

    pub fn chat(&mut self, content: impl Into<String>) -> &mut Self {
        self.chat_with(content, TextAttributes::new())
    }

    // Attribute-carrying forms of the named variants above.

    pub fn text_with(
        &mut self,
        content: impl Into<String>,
        attributes: TextAttributes,
    ) -> &mut Self {
        self.styled_text(TextSubtype::Plain, content, attributes)
    }

    pub fn heading_with(
        &mut self,
        content: impl Into<String>,
        attributes: TextAttributes,
    ) -> &mut Self {
        self.styled_text(TextSubtype::Heading, content, attributes)
    }

    pub fn subheading_with(
        &mut self,
        content: impl Into<String>,
        attributes: TextAttributes,
    ) -> &mut Self {
        self.styled_text(TextSubtype::Subheading, content, attributes)
    }

    pub fn cursive_with(
        &mut self,
        content: impl Into<String>,
        attributes: TextAttributes,
    ) -> &mut Self {
        self.styled_text(TextSubtype::Cursive, content, attributes)
    }

    pub fn quote_with(
        &mut self,
        content: impl Into<String>,
        attributes: TextAttributes,
    ) -> &mut Self {
        self.styled_text(TextSubtype::Quote, content, attributes)
    }

    pub fn indented_with(
        &mut self,
        content: impl Into<String>,
        attributes: TextAttributes,
    ) -> &mut Self {
        self.styled_text(TextSubtype::Indented, content, attributes)
    }

    pub fn chat_with(
        &mut self,
        content: impl Into<String>,
        attributes: TextAttributes,
    ) -> &mut Self {
        self.styled_text(TextSubtype::Chat, content, attributes)
    }

    /// Append one list-item block per entry. The platform has no list
    /// container; each item carries its own marker. `attributes` is copied
    /// onto every item.
    pub fn list<S: Into<String>>(
        &mut self,
        style: ListStyle,
        items: impl IntoIterator<Item = S>,
        attributes: TextAttributes,
    ) -> &mut Self {
        for item in items {
            self.styled_text(style.item_subtype(), item, attributes.clone());
        }
        self
    }

    pub fn ordered_list<S: Into<String>>(
        &mut self,
        items: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.list(ListStyle::Ordered, items, TextAttributes::new())
    }

    pub fn unordered_list<S: Into<String>>(
        &mut self,
        items: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.list(ListStyle::Unordered, items, TextAttributes::new())
    }

    pub fn image(
        &mut self,
        source: &str,
        media_type: &str,
        alt_text: &str,
        caption: Option<&str>,
    ) -> Result<&mut Self, ValidationError> {
        let image = ImageBlock::build(source, media_type, alt_text, caption, self.ids.as_ref())?;
        self.blocks.push(Block::Image(image));
        Ok(self)
    }

    /// Append a single row holding every image described by `specs`, in order.
    /// Nothing is appended if any spec is malformed.
    pub fn row_of<I>(&mut self, specs: I) -> Result<&mut Self, ValidationError>
    where
        I: IntoIterator,
        I::Item: Into<ImageSpec>,
    {
        let images = specs
            .into_iter()
            .map(|spec| {
                let spec: ImageSpec = spec.into();
                spec.normalize(self.ids.as_ref())
            })
            .collect::<Result<Vec<_>, _>>()?;

        if images.is_empty() {
            return Err(ValidationError::MalformedImageSpec {
                reason: "a row needs at least one image".to_string(),
            });
        }

        self.blocks.push(Block::Row(RowBlock { images }));
        Ok(self)
    }

    /// Append a "keep reading" marker that truncates the post.
    pub fn read_more(&mut self) -> &mut Self {
        self.blocks.push(Block::ReadMore);
        self
    }

    /// Append a poll with a seven day expiry and generated ids.
    pub fn poll<S: Into<String>>(
        &mut self,
        question: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Result<&mut Self, ValidationError> {
        self.poll_with(question, options, PollSettings::default())
    }

    /// Append a poll. Supplied option ids pair 1:1 with `options` in order;
    /// a count mismatch is rejected before anything is appended.
    pub fn poll_with<S: Into<String>>(
        &mut self,
        question: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        settings: PollSettings,
    ) -> Result<&mut Self, ValidationError> {
        let question = question.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();

        let option_ids = match settings.option_ids {
            Some(ids) if ids.len() != options.len() => {
                return Err(ValidationError::OptionCountMismatch {
                    options: options.len(),
                    ids: ids.len(),
                });
            }
            Some(ids) => ids
                .into_iter()
                .map(AnswerId::new)
                .collect::<Result<Vec<_>, _>>()?,
            None => options
                .iter()
                .map(|_| AnswerId::from_uuid(self.ids.generate()))
                .collect(),
        };

        if options.iter().any(|option| option.trim().is_empty()) {
            return Err(ValidationError::EmptyField("poll option"));
        }

        if question.trim().is_empty() {
            return Err(ValidationError::EmptyField("poll question"));
        }

        let poll_id = match settings.poll_id {
            Some(id) => PollId::new(id)?,
            None => PollId::from_uuid(self.ids.generate()),
        };

        let mut seen = HashSet::with_capacity(option_ids.len() + 1);
        seen.insert(poll_id.as_str());
        if let Some(clash) = option_ids.iter().find(|id| !seen.insert(id.as_str())) {
            return Err(ValidationError::DuplicateId(clash.to_string()));
        }

        log::debug!(
            "Appending poll {} with {} options, expiring after {}s",
            poll_id,
            options.len(),
            settings.expire_after.as_secs()
        );

        self.blocks.push(Block::Poll(PollBlock {
            question,
            options: options
                .into_iter()
                .zip(option_ids)
                .map(|(text, option_id)| PollOption { text, option_id })
                .collect(),
            poll_id,
            expire_after: settings.expire_after,
        }));
        Ok(self)
    }

    /// The blocks appended so far. The builder stays usable afterwards.
    pub fn build(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }
}
