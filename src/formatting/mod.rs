// src/formatting/mod.rs
//! Converts a Notion page's block tree into markdown.

pub mod block_renderer;
mod pure_visitor;
mod rich_text;
mod state;

pub use block_renderer::render_blocks;
pub use rich_text::{rich_text_to_markdown, rich_text_to_plain};

use crate::api::NotionRepository;
use crate::constants::BLOCK_MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::model::Block;
use crate::types::{BlockId, PageId};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// The ability to turn a page into markdown.
#[async_trait::async_trait]
pub trait MarkdownConverter: Send + Sync {
    /// The page's block tree, children attached.
    async fn page_to_blocks(&self, page: &PageId) -> Result<Vec<Block>, AppError>;

    fn to_markdown_string(&self, blocks: &[Block]) -> Result<String, AppError>;

    async fn page_to_markdown(&self, page: &PageId) -> Result<String, AppError> {
        let blocks = self.page_to_blocks(page).await?;
        self.to_markdown_string(&blocks)
    }
}

/// Fetches block trees through a [`NotionRepository`] and renders them.
///
/// Children are fetched depth-first, one request at a time. Child pages are
/// not descended into.
pub struct NotionToMarkdown<R: ?Sized> {
    notion: Arc<R>,
}

impl<R> NotionToMarkdown<R>
where
    R: NotionRepository + ?Sized,
{
    pub fn new(notion: Arc<R>) -> Self {
        Self { notion }
    }

    fn fetch_tree(&self, parent: BlockId, depth: usize) -> BoxFuture<'_, Result<Vec<Block>, AppError>> {
        async move {
            let mut blocks = self.notion.retrieve_children(&parent).await?;
            log::debug!("Fetched {} children of {} at depth {}", blocks.len(), parent, depth);

            for block in &mut blocks {
                if !block.has_children() || matches!(block, Block::ChildPage(_)) {
                    continue;
                }
                if depth + 1 >= BLOCK_MAX_FETCH_DEPTH {
                    log::warn!(
                        "Not fetching children of {} block {}: depth limit {} reached",
                        block.block_type(),
                        block.id(),
                        BLOCK_MAX_FETCH_DEPTH
                    );
                    continue;
                }
                let children = self.fetch_tree(block.id().clone(), depth + 1).await?;
                block.set_children(children);
            }

            Ok(blocks)
        }
        .boxed()
    }
}

#[async_trait::async_trait]
impl<R> MarkdownConverter for NotionToMarkdown<R>
where
    R: NotionRepository + ?Sized,
{
    async fn page_to_blocks(&self, page: &PageId) -> Result<Vec<Block>, AppError> {
        self.fetch_tree(BlockId::from(page), 0).await
    }

    fn to_markdown_string(&self, blocks: &[Block]) -> Result<String, AppError> {
        render_blocks(blocks)
    }
}
