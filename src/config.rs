// src/config.rs
use crate::constants::{POSTS_PER_PAGE, TOP_PAGE_POSTS};
use crate::error::AppError;
use crate::posts::pagination::checked_page_size;
use crate::types::ApiKey;
use clap::{Parser, Subcommand};

const TOKEN_VAR: &str = "NOTION_TOKEN";
const DATABASE_VAR: &str = "NOTION_DATABASE_ID";
const POSTS_PER_PAGE_VAR: &str = "NOTION_POSTS_PER_PAGE";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Posts per listing page (falls back to NOTION_POSTS_PER_PAGE, then 4)
    #[arg(long, global = true)]
    pub posts_per_page: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every published post, newest first
    List,
    /// The newest posts
    Top {
        #[arg(long, default_value_t = TOP_PAGE_POSTS)]
        count: usize,
    },
    /// One page of the listing (1-based)
    Page { number: usize },
    /// How many listing pages there are
    Pages,
    /// One page of the posts carrying a tag (1-based)
    Tag { tag: String, number: usize },
    /// How many pages of posts carry a tag
    TagPages { tag: String },
    /// Every tag in use
    Tags,
    /// A single post rendered to markdown
    Post { slug: String },
}

/// Resolved configuration: credentials, target database and output options.
#[derive(Debug, Clone)]
pub struct BlogConfig {
    pub api_key: ApiKey,
    /// Passed to Notion unvalidated; may be empty.
    pub database_id: String,
    pub posts_per_page: usize,
    pub command: Command,
    pub json: bool,
    pub verbose: bool,
}

impl BlogConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves configuration reading variables through `env`.
    pub fn resolve_with<F>(cli: CommandLineInput, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = env(TOKEN_VAR).ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", TOKEN_VAR))
        })?;
        let api_key = ApiKey::new(token)?;

        let database_id = env(DATABASE_VAR).unwrap_or_default();
        if database_id.is_empty() {
            log::warn!("{} is not set; using an empty database id", DATABASE_VAR);
        }

        let posts_per_page = match cli.posts_per_page {
            Some(size) => size,
            None => match env(POSTS_PER_PAGE_VAR) {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    AppError::MissingConfiguration(format!(
                        "{} must be a positive integer, got '{}'",
                        POSTS_PER_PAGE_VAR, raw
                    ))
                })?,
                None => POSTS_PER_PAGE,
            },
        };

        Ok(Self {
            api_key,
            database_id,
            posts_per_page: checked_page_size(posts_per_page)?,
            command: cli.command,
            json: cli.json,
            verbose: cli.verbose,
        })
    }
}
