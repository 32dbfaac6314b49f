// src/lib.rs
//! notion-blog library: reads blog posts out of a Notion database.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Posts**: `PostRepository` and its pagination and schema helpers
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `BlogConfig`, `CommandLineInput`
//! - **Domain model**: `PostMetadata`, `Post`, `Block` and the block types
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `DatabaseQuery`
//! - **Formatting**: `MarkdownConverter`, `NotionToMarkdown`, `render_blocks`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod model;
pub mod posts;
pub mod types;

// --- Posts ---
pub use crate::posts::{
    metadata_from_row, page_count, top, PageRequest, PostRepository, RowReadError,
    SchemaViolation, ValidatedRow, POST_SCHEMA,
};

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{BlogConfig, Command, CommandLineInput};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon, Post, PostMetadata, RawRow};

// --- Domain Types ---
pub use crate::types::{Annotations, ApiKey, BlockId, Link, PageId, RichTextItem, RichTextType};

// --- API Client ---
pub use crate::api::{
    DatabaseQuery, NotionHttpClient, NotionRepository, PaginatedResponse, QueryResult,
};

// --- Formatting ---
pub use crate::formatting::{render_blocks, MarkdownConverter, NotionToMarkdown};
