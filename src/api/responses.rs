// src/api/responses.rs
//! Response envelopes shared by the list endpoints.

use crate::model::RawRow;
use serde::{Deserialize, Serialize};

pub use notion_client::objects::{block::Block as NotionBlock, error::Error as NotionError};

/// Generic paginated response from the Notion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Converts every result, keeping the cursor fields.
    pub fn try_map<U, E, F>(self, f: F) -> Result<PaginatedResponse<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(PaginatedResponse {
            object: self.object,
            results: self.results.into_iter().map(f).collect::<Result<_, _>>()?,
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        })
    }
}

/// One page of database query results, rows left as raw JSON.
pub type QueryResult = PaginatedResponse<RawRow>;

/// Block children response using notion-client types
pub type RetrieveBlockChildrenResponse = PaginatedResponse<NotionBlock>;
