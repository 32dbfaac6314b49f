// tests/common/mod.rs
//! Shared test doubles and row builders.

#![allow(dead_code)]

use notion_blog::api::{DatabaseQuery, FilterCondition, QueryResult};
use notion_blog::error::NotionErrorCode;
use notion_blog::{AppError, Block, BlockId, NotionRepository};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory Notion workspace that records every request it serves.
#[derive(Default)]
pub struct MockNotionClient {
    published: Vec<Value>,
    has_more: bool,
    by_slug: HashMap<String, Vec<Value>>,
    children: HashMap<String, Vec<Block>>,
    fail_queries: bool,
    queries: Arc<Mutex<Vec<(String, DatabaseQuery)>>>,
    children_requests: Arc<Mutex<Vec<String>>>,
}

impl MockNotionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_published(mut self, rows: Vec<Value>) -> Self {
        self.published = rows;
        self
    }

    pub fn with_more_rows_remaining(mut self) -> Self {
        self.has_more = true;
        self
    }

    pub fn with_slug(mut self, slug: &str, rows: Vec<Value>) -> Self {
        self.by_slug.insert(slug.to_string(), rows);
        self
    }

    /// Children returned for `parent` (a dashed or undashed id).
    pub fn with_children(mut self, parent: &str, blocks: Vec<Block>) -> Self {
        let parent = BlockId::parse(parent).expect("test parent id should be valid");
        self.children.insert(parent.as_str().to_string(), blocks);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub async fn queries(&self) -> Vec<(String, DatabaseQuery)> {
        self.queries.lock().await.clone()
    }

    pub async fn children_requests(&self) -> Vec<String> {
        self.children_requests.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl NotionRepository for MockNotionClient {
    async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<QueryResult, AppError> {
        self.queries
            .lock()
            .await
            .push((database_id.to_string(), query.clone()));

        if self.fail_queries {
            return Err(AppError::NotionService {
                code: NotionErrorCode::ObjectNotFound,
                message: "Could not find database".to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            });
        }

        let (results, has_more) = match query.filter.as_ref().map(|f| &f.condition) {
            Some(FilterCondition::Checkbox { equals: true }) => {
                (self.published.clone(), self.has_more)
            }
            Some(FilterCondition::Formula { string }) => (
                self.by_slug.get(&string.equals).cloned().unwrap_or_default(),
                false,
            ),
            _ => (Vec::new(), false),
        };

        Ok(QueryResult {
            object: "list".to_string(),
            results,
            next_cursor: has_more.then(|| "next-page".to_string()),
            has_more,
        })
    }

    async fn retrieve_children(&self, parent: &BlockId) -> Result<Vec<Block>, AppError> {
        self.children_requests
            .lock()
            .await
            .push(parent.as_str().to_string());
        Ok(self.children.get(parent.as_str()).cloned().unwrap_or_default())
    }
}

/// A page id whose last digits are `n`.
pub fn page_id(n: u32) -> String {
    format!("00000000-0000-4000-8000-{:012}", n)
}

/// A database row with the blog's property envelopes.
pub fn post_row(n: u32, title: &str, date: &str, slug: &str, tags: &[&str]) -> Value {
    json!({
        "object": "page",
        "id": page_id(n),
        "created_time": "2024-01-01T00:00:00.000Z",
        "archived": false,
        "properties": {
            "Title": { "id": "title", "type": "title", "title": [
                { "type": "text", "text": { "content": title, "link": null }, "plain_text": title, "href": null }
            ] },
            "Description": { "id": "d", "type": "rich_text", "rich_text": [
                { "type": "text", "text": { "content": "About", "link": null }, "plain_text": format!("About {}", title), "href": null }
            ] },
            "Date": { "id": "t", "type": "date", "date": { "start": date, "end": null, "time_zone": null } },
            "Slug": { "id": "s", "type": "rich_text", "rich_text": [
                { "type": "text", "text": { "content": slug, "link": null }, "plain_text": slug, "href": null }
            ] },
            "Tags": { "id": "g", "type": "multi_select", "multi_select":
                tags.iter().enumerate().map(|(i, name)| json!({ "id": i.to_string(), "name": name, "color": "default" })).collect::<Vec<_>>()
            },
            "Published": { "id": "p", "type": "checkbox", "checkbox": true }
        }
    })
}

/// Ten posts, newest first, with overlapping tags.
pub fn ten_posts() -> Vec<Value> {
    let tags: [&[&str]; 10] = [
        &["rust", "web"],
        &["rust"],
        &["life"],
        &["web", "css"],
        &["rust", "async"],
        &[],
        &["life", "Rust"],
        &["web"],
        &["rust"],
        &["async"],
    ];
    tags.iter()
        .enumerate()
        .map(|(i, tags)| {
            let n = i as u32 + 1;
            post_row(
                n,
                &format!("Post {}", n),
                &format!("2024-01-{:02}", 30 - n),
                &format!("post-{}", n),
                tags,
            )
        })
        .collect()
}
