// src/formatting/block_renderer.rs
//! Entry point for rendering a block tree to a markdown document.

use super::pure_visitor::{join_rendered, BlockRenderer, MarkdownBlockRenderer};
use super::state::FormatContext;
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::error::AppError;
use crate::model::Block;

/// Renders top-level blocks (with their fetched children) into markdown.
///
/// The result ends with a newline unless it is empty.
pub fn render_blocks(blocks: &[Block]) -> Result<String, AppError> {
    log::debug!("Rendering {} top-level blocks", blocks.len());

    let results = MarkdownBlockRenderer.render_children(blocks, FormatContext::new())?;

    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    output.push_str(&join_rendered(blocks, &results));
    if !output.is_empty() {
        output.push('\n');
    }

    log::debug!("Rendered markdown: {} bytes", output.len());
    Ok(output)
}
