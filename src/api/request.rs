// src/api/request.rs
//! Transport-agnostic request descriptions.
//!
//! [`RequestAssembler`] turns finished blocks plus post metadata into a JSON
//! body; [`RequestDescription`] pairs a body with its route so any
//! [`Transport`](super::Transport) can execute it.

use super::wire::encode_block;
use crate::constants::TAG_SEPARATOR;
use crate::error::SerializationError;
use crate::model::{Block, MediaSource};
use crate::types::{BlogName, MediaId, PollId, PostId};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

/// Body keys owned by the assembler; extra fields never override them.
const RESERVED_BODY_KEYS: [&str; 3] = ["content", "layout", "tags"];

/// A local file that must travel with the request as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub identifier: MediaId,
    pub path: PathBuf,
    pub media_type: String,
}

/// The assembled post body plus any uploads it references.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPayload {
    pub body: Value,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Default, Serialize)]
struct Layout {
    #[serde(rename = "type")]
    kind: &'static str,
    display: Vec<DisplayRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    truncate_after: Option<usize>,
}

#[derive(Debug, Serialize)]
struct DisplayRow {
    blocks: Vec<usize>,
}

/// Pure transform from blocks and post metadata to a request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestAssembler;

impl RequestAssembler {
    /// Assemble `{content, layout, tags, ...extra}`.
    ///
    /// Every block becomes one content entry except read-more markers, which
    /// set `truncate_after` to the last entry before them. Extra fields may
    /// not replace `content`, `layout` or `tags`.
    pub fn assemble<S: AsRef<str>>(
        &self,
        blocks: &[Block],
        tags: &[S],
        extra: &Map<String, Value>,
    ) -> Result<PostPayload, SerializationError> {
        let mut content = Vec::with_capacity(blocks.len());
        let mut layout = Layout {
            kind: "rows",
            ..Layout::default()
        };
        let mut attachments = Vec::new();

        for block in blocks {
            attachments.extend(block.images().iter().filter_map(|image| match &image.source {
                MediaSource::File { path, identifier } => Some(Attachment {
                    identifier: identifier.clone(),
                    path: path.clone(),
                    media_type: image.media_type.clone(),
                }),
                MediaSource::Url(_) => None,
            }));

            match encode_block(block)? {
                Some(entry) => {
                    layout.display.push(DisplayRow {
                        blocks: vec![content.len()],
                    });
                    content.push(entry);
                }
                None => match content.len().checked_sub(1) {
                    Some(last) => layout.truncate_after = Some(last),
                    None => log::warn!("Ignoring read-more marker at the start of a post"),
                },
            }
        }

        let mut body: Map<String, Value> = extra
            .iter()
            .filter(|(key, _)| !RESERVED_BODY_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let layout = serde_json::to_value(&layout).map_err(|source| {
            SerializationError::Encode {
                what: "layout",
                source,
            }
        })?;

        body.insert("content".to_string(), Value::Array(content));
        body.insert("layout".to_string(), json!([layout]));
        body.insert("tags".to_string(), Value::from(join_tags(tags)));

        Ok(PostPayload {
            body: Value::Object(body),
            attachments,
        })
    }
}

fn join_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParams {
    pub blog: BlogName,
    pub post_id: Option<PostId>,
    pub poll_id: Option<PollId>,
}

/// Everything a transport needs to issue one call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescription {
    /// Path below the API root, without a leading slash.
    pub route: String,
    pub method: Method,
    pub body: Option<Value>,
    pub path_params: PathParams,
    pub attachments: Vec<Attachment>,
}

impl RequestDescription {
    /// `POST blog/{blog}/posts`, used for new posts and reblogs alike.
    pub fn create_post(blog: &BlogName, payload: PostPayload) -> Self {
        Self {
            route: format!("blog/{}/posts", blog),
            method: Method::Post,
            body: Some(payload.body),
            path_params: PathParams {
                blog: blog.clone(),
                post_id: None,
                poll_id: None,
            },
            attachments: payload.attachments,
        }
    }

    /// `GET blog/{blog}/posts/{post_id}`
    pub fn get_post(blog: &BlogName, post_id: &PostId) -> Self {
        Self {
            route: format!("blog/{}/posts/{}", blog, post_id),
            method: Method::Get,
            body: None,
            path_params: PathParams {
                blog: blog.clone(),
                post_id: Some(post_id.clone()),
                poll_id: None,
            },
            attachments: Vec::new(),
        }
    }

    /// `GET polls/{blog}/{post_id}/{poll_id}/results`
    pub fn poll_results(blog: &BlogName, post_id: &PostId, poll_id: &PollId) -> Self {
        Self {
            route: format!("polls/{}/{}/{}/results", blog, post_id, poll_id),
            method: Method::Get,
            body: None,
            path_params: PathParams {
                blog: blog.clone(),
                post_id: Some(post_id.clone()),
                poll_id: Some(poll_id.clone()),
            },
            attachments: Vec::new(),
        }
    }
}
