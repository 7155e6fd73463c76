// src/lib.rs
//! tumblr-npf library: builds Neue Post Format content and talks to the Tumblr API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `SerializationError`, `ValidationError`
//! - **Configuration**: `ClientConfig`, `CommandLineInput`
//! - **Domain model**: `Block`, `ContentBuilder`, poll results
//! - **Domain types**: `PollId`, `AnswerId`, `MediaId`, `BlogName`, `PostId`
//! - **API client**: `TumblrClient`, `TumblrHttpClient`, `Transport`, `RequestAssembler`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result, SerializationError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{parse_post_id, poll_expiry, ClientConfig, Command, CommandLineInput};

// --- Domain Model ---
pub use crate::model::{
    find_polls, zip_poll_with_results, AnswerTally, Block, ContentBuilder, EnrichedPoll,
    IdGenerator, ImageSpec, PollResults, PollSettings,
};

// --- Block Types ---
pub use crate::model::blocks::{
    ImageBlock, ListStyle, MediaSource, PollBlock, PollOption, RowBlock, TextAttributes,
    TextBlock, TextSubtype,
};

// --- Domain Types ---
pub use crate::types::{AccessToken, AnswerId, BlogName, Id, MediaId, PollId, PostId};

// --- API Client ---
pub use crate::api::{
    parser::{decode_parent_post, decode_post_polls, parse_poll_results, ParentPost},
    wire::encode_block,
    Attachment, Method, PathParams, PostPayload, ReblogTarget, RequestAssembler,
    RequestDescription, Transport, TumblrClient, TumblrHttpClient,
};
