// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use serde_json::Map;
use std::fs;
use tumblr_npf::{
    parse_post_id, poll_expiry, AppError, BlogName, ClientConfig, Command, CommandLineInput,
    ContentBuilder, PollSettings, ReblogTarget, TumblrClient, TumblrHttpClient,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("tumblr_npf.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one subcommand and prints its JSON result to stdout.
async fn execute(
    command: Command,
    client: &TumblrClient<TumblrHttpClient>,
) -> Result<(), AppError> {
    let output = match command {
        Command::Post {
            paragraphs,
            heading,
            tags,
        } => {
            let mut builder = ContentBuilder::new();
            if let Some(heading) = heading {
                builder.heading(heading);
            }
            for paragraph in paragraphs {
                builder.text(paragraph);
            }
            client.post(builder.build(), &tags, Map::new()).await?
        }
        Command::Poll {
            question,
            options,
            days,
            tags,
        } => {
            let mut builder = ContentBuilder::new();
            builder.poll_with(
                question,
                options,
                PollSettings::default().expire_after(poll_expiry(days)),
            )?;
            client.post(builder.build(), &tags, Map::new()).await?
        }
        Command::Get { post_id } => client.get_post(&parse_post_id(&post_id)?, None).await?,
        Command::Results { post_id } => {
            let enriched = client.poll_results(&parse_post_id(&post_id)?, None).await?;
            serde_json::to_value(&enriched)?
        }
        Command::Reblog {
            from_blog,
            post_id,
            text,
            tags,
        } => {
            let mut builder = ContentBuilder::new();
            if let Some(text) = text {
                builder.text(text);
            }
            let target = ReblogTarget {
                from_id: parse_post_id(&post_id)?,
                from_blog: Some(BlogName::new(from_blog)?),
                to_blog: None,
            };
            client.reblog(&target, builder.build(), &tags).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = ClientConfig::resolve(&cli)?;
    log::debug!("Acting on blog {} with token {}", config.blog, config.access_token);

    let transport = TumblrHttpClient::new(&config.access_token)?;
    let client = TumblrClient::new(transport, config.blog);

    if let Err(e) = execute(cli.command, &client).await {
        log::error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}
