// src/main.rs

use anyhow::Context;
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
use notion_blog::{
    BlogConfig, Command, CommandLineInput, NotionHttpClient, NotionRepository, NotionToMarkdown,
    Post, PostMetadata, PostRepository,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_blog.log");
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
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Wires the HTTP client, markdown converter and repository together.
fn build_repository(config: &BlogConfig) -> anyhow::Result<PostRepository> {
    let client: Arc<dyn NotionRepository> = Arc::new(
        NotionHttpClient::new(&config.api_key).context("Failed to build the Notion HTTP client")?,
    );
    let markdown = Arc::new(NotionToMarkdown::new(client.clone()));
    Ok(PostRepository::new(
        client,
        markdown,
        config.database_id.clone(),
    ))
}

/// Runs one subcommand and prints its result.
async fn execute(config: &BlogConfig, posts: &PostRepository) -> anyhow::Result<()> {
    let per_page = config.posts_per_page;

    match &config.command {
        Command::List => {
            let listed = posts.list_published().await.context("Failed to list posts")?;
            print_posts(&listed, config.json)?;
        }
        Command::Top { count } => {
            let listed = posts.top_page(*count).await.context("Failed to list top posts")?;
            print_posts(&listed, config.json)?;
        }
        Command::Page { number } => {
            let listed = posts
                .page_of(*number, per_page)
                .await
                .with_context(|| format!("Failed to list page {}", number))?;
            print_posts(&listed, config.json)?;
        }
        Command::Pages => {
            let count = posts.page_count(per_page).await.context("Failed to count pages")?;
            print_count(count, config.json)?;
        }
        Command::Tag { tag, number } => {
            let listed = posts
                .page_of_tag(tag, *number, per_page)
                .await
                .with_context(|| format!("Failed to list page {} of tag '{}'", number, tag))?;
            print_posts(&listed, config.json)?;
        }
        Command::TagPages { tag } => {
            let count = posts
                .page_count_of_tag(tag, per_page)
                .await
                .with_context(|| format!("Failed to count pages of tag '{}'", tag))?;
            print_count(count, config.json)?;
        }
        Command::Tags => {
            let tags = posts.all_tags().await.context("Failed to list tags")?;
            if config.json {
                println!("{}", serde_json::to_string_pretty(&tags)?);
            } else {
                for tag in tags {
                    println!("{}", tag);
                }
            }
        }
        Command::Post { slug } => {
            let post = posts
                .get_by_slug(slug)
                .await
                .with_context(|| format!("Failed to load post '{}'", slug))?;
            print_post(&post, config.json)?;
        }
    }

    Ok(())
}

fn print_posts(posts: &[PostMetadata], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
        return Ok(());
    }
    for post in posts {
        let date = post
            .published_on()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| post.date.clone());
        if post.tags.is_empty() {
            println!("{}  {}  {}", date, post.slug, post.title);
        } else {
            println!("{}  {}  {} [{}]", date, post.slug, post.title, post.tags.join(", "));
        }
    }
    Ok(())
}

fn print_count(count: usize, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::json!({ "pages": count }));
    } else {
        println!("{}", count);
    }
    Ok(())
}

fn print_post(post: &Post, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(post)?);
    } else {
        println!("# {}\n", post.metadata.title);
        if !post.metadata.description.is_empty() {
            println!("_{}_\n", post.metadata.description);
        }
        print!("{}", post.markdown);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = BlogConfig::resolve(cli).context("Invalid configuration")?;
    let posts = build_repository(&config)?;

    execute(&config, &posts).await
}
