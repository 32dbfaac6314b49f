// src/api/mod.rs
//! Notion API interaction: the ability to query the blog database and read
//! page content.
//!
//! Business logic depends on [`NotionRepository`], never on HTTP details.

pub mod client;
pub mod notion_client_adapter;
pub mod parser;
pub mod query;
mod responses;
mod simple_pagination;

use crate::error::AppError;
use crate::model::Block;
use crate::types::BlockId;

pub use client::NotionHttpClient;
pub use query::{DatabaseQuery, FilterCondition, PropertyFilter, Sort, SortDirection, StringCondition};
pub use responses::{PaginatedResponse, QueryResult};

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Runs one database query and returns the first page of results as-is.
    ///
    /// The cursor is not followed; callers see `has_more` and decide.
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResult, AppError>;

    /// All direct children of a block (or page), every page of them, in order.
    /// Grandchildren are not fetched.
    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError>;
}
