// src/config.rs
use crate::error::AppError;
use crate::types::{AccessToken, BlogName, PostId};
use clap::{Parser, Subcommand};
use std::time::Duration;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Environment variable holding the default blog.
pub const BLOG_ENV: &str = "TUMBLR_BLOG";
/// Environment variable holding the OAuth2 access token.
pub const ACCESS_TOKEN_ENV: &str = "TUMBLR_ACCESS_TOKEN";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Blog to act on (defaults to $TUMBLR_BLOG)
    #[arg(short, long, global = true)]
    pub blog: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a text post
    Post {
        /// Paragraphs, one text block each
        #[arg(required = true)]
        paragraphs: Vec<String>,

        /// Optional heading placed above the paragraphs
        #[arg(long)]
        heading: Option<String>,

        /// Tags, comma-separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Create a post holding a poll
    Poll {
        /// The poll question
        question: String,

        /// The answers, in display order
        #[arg(required = true, num_args = 2..)]
        options: Vec<String>,

        /// Days until the poll closes (the platform keeps this within 1..=7)
        #[arg(long, default_value_t = 7)]
        days: u64,

        /// Tags, comma-separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Print a post as JSON
    Get { post_id: String },

    /// Print the first poll of a post joined with its vote counts
    Results { post_id: String },

    /// Reblog a post, optionally adding text
    Reblog {
        /// Blog the source post lives on
        from_blog: String,

        /// Id of the source post
        post_id: String,

        /// Text added on top of the reblog
        #[arg(long)]
        text: Option<String>,

        /// Tags, comma-separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },
}

/// Resolved client configuration: who we are and which blog we act on.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub blog: BlogName,
    pub access_token: AccessToken,
    pub verbose: bool,
}

impl ClientConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Resolves configuration using `lookup` in place of the environment.
    pub fn resolve_with(
        cli: &CommandLineInput,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let blog = cli
            .blog
            .clone()
            .or_else(|| lookup(BLOG_ENV))
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "no blog given and {} is not set",
                    BLOG_ENV
                ))
            })?;

        let token = lookup(ACCESS_TOKEN_ENV).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                ACCESS_TOKEN_ENV
            ))
        })?;

        Ok(Self {
            blog: BlogName::new(blog)?,
            access_token: AccessToken::new(token)?,
            verbose: cli.verbose,
        })
    }
}

/// Poll lifetime for a `--days` argument. Saturates instead of overflowing.
pub fn poll_expiry(days: u64) -> Duration {
    Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY))
}

/// Parses a post id argument.
pub fn parse_post_id(input: &str) -> Result<PostId, AppError> {
    Ok(PostId::parse(input)?)
}
