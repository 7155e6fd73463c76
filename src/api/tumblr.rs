// src/api/tumblr.rs
//! High-level operations: posting, fetching, reblogging and poll results.

use super::parser::{decode_parent_post, decode_post_polls, parse_poll_results};
use super::request::{RequestAssembler, RequestDescription};
use super::Transport;
use crate::error::AppError;
use crate::model::{zip_poll_with_results, Block, EnrichedPoll, PollResults};
use crate::types::{BlogName, PollId, PostId};
use serde_json::{Map, Value};

/// Where a reblog comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReblogTarget {
    pub from_id: PostId,
    /// Blog of the source post; the client's blog when `None`.
    pub from_blog: Option<BlogName>,
    /// Blog receiving the reblog; the client's blog when `None`.
    pub to_blog: Option<BlogName>,
}

/// Tumblr operations over any [`Transport`], bound to a default blog.
#[derive(Debug, Clone)]
pub struct TumblrClient<T> {
    transport: T,
    blog: BlogName,
    assembler: RequestAssembler,
}

impl<T: Transport> TumblrClient<T> {
    pub fn new(transport: T, blog: BlogName) -> Self {
        Self {
            transport,
            blog,
            assembler: RequestAssembler,
        }
    }

    pub fn blog(&self) -> &BlogName {
        &self.blog
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a post on the client's blog. `extra` carries any further body
    /// fields the endpoint accepts (`state`, `publish_on`, ...).
    pub async fn post<S: AsRef<str>>(
        &self,
        content: &[Block],
        tags: &[S],
        extra: Map<String, Value>,
    ) -> Result<Value, AppError> {
        let payload = self.assembler.assemble(content, tags, &extra)?;
        let request = RequestDescription::create_post(&self.blog, payload);
        self.transport.execute(&request).await
    }

    /// Fetch a post in NPF form.
    pub async fn get_post(
        &self,
        post_id: &PostId,
        blog: Option<&BlogName>,
    ) -> Result<Value, AppError> {
        let blog = blog.unwrap_or(&self.blog);
        self.transport
            .execute(&RequestDescription::get_post(blog, post_id))
            .await
    }

    /// Reblog a post, adding `content` on top. The new content may include a
    /// poll even when the source post already has one.
    pub async fn reblog<S: AsRef<str>>(
        &self,
        target: &ReblogTarget,
        content: &[Block],
        tags: &[S],
    ) -> Result<Value, AppError> {
        // Assemble first so invalid content fails before any request is made
        let mut extra = Map::new();
        extra.insert("parent_post_id".to_string(), Value::from(target.from_id.as_u64()?));
        let mut payload = self.assembler.assemble(content, tags, &extra)?;

        let parent_post = self.get_post(&target.from_id, target.from_blog.as_ref()).await?;
        let parent = decode_parent_post(&parent_post)?;
        if let Value::Object(body) = &mut payload.body {
            body.insert(
                "parent_tumblelog_uuid".to_string(),
                Value::from(parent.tumblelog_uuid),
            );
            body.insert("reblog_key".to_string(), Value::from(parent.reblog_key));
        }

        let to_blog = target.to_blog.as_ref().unwrap_or(&self.blog);
        log::debug!("Reblogging post {} onto {}", target.from_id, to_blog);
        self.transport
            .execute(&RequestDescription::create_post(to_blog, payload))
            .await
    }

    /// Vote counts for one poll, keyed by answer id.
    pub async fn raw_poll_results(
        &self,
        post_id: &PostId,
        poll_id: &PollId,
        blog: Option<&BlogName>,
    ) -> Result<PollResults, AppError> {
        let blog = blog.unwrap_or(&self.blog);
        let body = self
            .transport
            .execute(&RequestDescription::poll_results(blog, post_id, poll_id))
            .await?;
        parse_poll_results(&body)
    }

    /// The first poll in a post, joined with its current results.
    pub async fn poll_results(
        &self,
        post_id: &PostId,
        blog: Option<&BlogName>,
    ) -> Result<EnrichedPoll, AppError> {
        let post = self.get_post(post_id, blog).await?;
        let polls = decode_post_polls(&post)?;
        if polls.len() > 1 {
            log::debug!(
                "Post {} holds {} polls; reporting the first",
                post_id,
                polls.len()
            );
        }

        let poll = polls.into_iter().next().ok_or_else(|| AppError::NoPollInPost {
            post_id: post_id.to_string(),
        })?;
        let results = self.raw_poll_results(post_id, &poll.poll_id, blog).await?;
        Ok(zip_poll_with_results(&poll, &results))
    }
}
