// src/posts/mod.rs
//! Blog post access: listing, lookup by slug, pagination and tags.
//!
//! Every operation refetches from Notion; nothing is cached between calls.

pub mod pagination;
pub mod schema;
pub mod transform;

pub use pagination::{page_count, top, PageRequest};
pub use schema::{FieldRule, PostSchema, SchemaViolation, Shape, ValidatedRow, POST_SCHEMA};
pub use transform::{metadata_from_row, RowReadError};

use crate::api::{DatabaseQuery, NotionRepository};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::formatting::MarkdownConverter;
use crate::model::{Post, PostMetadata};
use crate::types::PageId;
use indexmap::IndexSet;
use std::sync::Arc;

/// Read-only view of the blog database.
#[derive(Clone)]
pub struct PostRepository {
    notion: Arc<dyn NotionRepository>,
    markdown: Arc<dyn MarkdownConverter>,
    database_id: String,
}

impl PostRepository {
    pub fn new(
        notion: Arc<dyn NotionRepository>,
        markdown: Arc<dyn MarkdownConverter>,
        database_id: impl Into<String>,
    ) -> Self {
        let database_id = database_id.into();
        if database_id.is_empty() {
            log::warn!("Database id is empty; queries will be rejected by Notion");
        }
        Self {
            notion,
            markdown,
            database_id,
        }
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Published posts, newest first.
    ///
    /// Only the first 100 rows are read. A row that cannot be read fails the
    /// whole call with [`AppError::MalformedRow`].
    pub async fn list_published(&self) -> Result<Vec<PostMetadata>, AppError> {
        let response = self
            .notion
            .query_database(&self.database_id, &DatabaseQuery::published_posts())
            .await?;

        if response.has_more {
            log::warn!(
                "Database has more than {} published posts; only the first {} are listed",
                NOTION_API_PAGE_SIZE,
                NOTION_API_PAGE_SIZE
            );
        }
        log::info!("Fetched {} published posts", response.results.len());

        response
            .results
            .iter()
            .enumerate()
            .map(|(index, row)| {
                metadata_from_row(row).map_err(|source| AppError::MalformedRow { index, source })
            })
            .collect()
    }

    /// The post whose slug matches, with its body rendered to markdown.
    ///
    /// A missing row and a row that fails [`POST_SCHEMA`] both yield
    /// [`AppError::PostShapeMismatch`].
    pub async fn get_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        let response = self
            .notion
            .query_database(&self.database_id, &DatabaseQuery::post_by_slug(slug))
            .await?;

        let Some(row) = response.results.first() else {
            log::debug!("No row found for slug '{}'", slug);
            return Err(AppError::PostShapeMismatch);
        };

        let validated = POST_SCHEMA.validate(row).map_err(|violation| {
            log::warn!("Row for slug '{}' is not a post: {}", slug, violation);
            AppError::PostShapeMismatch
        })?;

        let metadata = validated.metadata().map_err(|err| {
            log::warn!("Row for slug '{}' could not be read: {}", slug, err);
            AppError::PostShapeMismatch
        })?;

        let page_id = PageId::parse(&metadata.id)?;
        let markdown = self.markdown.page_to_markdown(&page_id).await?;

        Ok(Post { metadata, markdown })
    }

    /// The newest `count` posts.
    pub async fn top_page(&self, count: usize) -> Result<Vec<PostMetadata>, AppError> {
        let posts = self.list_published().await?;
        Ok(top(&posts, count).to_vec())
    }

    /// One page of the published listing. Pages past the end are empty.
    pub async fn page_of(
        &self,
        page_number: usize,
        page_size: usize,
    ) -> Result<Vec<PostMetadata>, AppError> {
        let request = PageRequest::new(page_number, page_size)?;
        let posts = self.list_published().await?;
        Ok(request.slice(&posts).to_vec())
    }

    pub async fn page_count(&self, page_size: usize) -> Result<usize, AppError> {
        let page_size = pagination::checked_page_size(page_size)?;
        let posts = self.list_published().await?;
        Ok(page_count(posts.len(), page_size))
    }

    /// One page of the posts carrying `tag` (exact, case-sensitive match).
    pub async fn page_of_tag(
        &self,
        tag: &str,
        page_number: usize,
        page_size: usize,
    ) -> Result<Vec<PostMetadata>, AppError> {
        let request = PageRequest::new(page_number, page_size)?;
        let posts = self.tagged(tag).await?;
        Ok(request.slice(&posts).to_vec())
    }

    pub async fn page_count_of_tag(&self, tag: &str, page_size: usize) -> Result<usize, AppError> {
        let page_size = pagination::checked_page_size(page_size)?;
        let posts = self.tagged(tag).await?;
        Ok(page_count(posts.len(), page_size))
    }

    /// Every distinct tag across published posts, in first-seen order.
    pub async fn all_tags(&self) -> Result<Vec<String>, AppError> {
        let posts = self.list_published().await?;
        let tags: IndexSet<String> = posts.into_iter().flat_map(|post| post.tags).collect();
        Ok(tags.into_iter().collect())
    }

    async fn tagged(&self, tag: &str) -> Result<Vec<PostMetadata>, AppError> {
        let posts = self.list_published().await?;
        Ok(posts.into_iter().filter(|post| post.has_tag(tag)).collect())
    }
}
