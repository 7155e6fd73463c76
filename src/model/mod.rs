// src/model/mod.rs
//! Post content model: blocks, the builder that accumulates them, and the
//! poll helpers that read them back.

mod block;
pub mod blocks;
mod builder;
mod image_spec;
mod polls;

pub use block::Block;
pub use blocks::{
    ImageBlock, ListStyle, MediaSource, PollBlock, PollOption, RowBlock, TextAttributes,
    TextBlock, TextSubtype,
};
pub use builder::{ContentBuilder, IdGenerator, PollSettings};
pub use image_spec::ImageSpec;
pub use polls::{find_polls, zip_poll_with_results, AnswerTally, EnrichedPoll, PollResults};
