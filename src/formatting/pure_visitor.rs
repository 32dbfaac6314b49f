// src/formatting/pure_visitor.rs
//! Block visitor producing markdown.
//!
//! Each block renders to a chunk without a trailing newline; siblings are
//! joined by [`join_rendered`], which puts a blank line between blocks and a
//! single newline inside list runs and tables.

use super::rich_text::{rich_text_to_markdown, rich_text_to_plain};
use super::state::FormatContext;
use crate::constants::LIST_CHILD_INDENT;
use crate::error::AppError;
use crate::model::*;
use crate::types::RichTextItem;

/// The result of rendering a single block: content plus the context for the next sibling.
#[derive(Debug, Clone)]
pub struct BlockRenderResult {
    pub content: String,
    pub context: FormatContext,
}

/// Trait for formatting blocks into output strings.
pub trait BlockRenderer {
    fn render_block(
        &self,
        block: &Block,
        context: FormatContext,
    ) -> Result<BlockRenderResult, AppError>;

    /// Format sibling blocks in order, threading context through them.
    fn render_children(
        &self,
        blocks: &[Block],
        context: FormatContext,
    ) -> Result<Vec<BlockRenderResult>, AppError> {
        let mut results = Vec::with_capacity(blocks.len());
        let mut current_context = context;

        for block in blocks {
            let result = self.render_block(block, current_context)?;
            current_context = result.context.clone();
            results.push(result);
        }

        Ok(results)
    }
}

/// Joins rendered siblings, dropping empty chunks.
pub fn join_rendered(blocks: &[Block], results: &[BlockRenderResult]) -> String {
    let mut output = String::new();
    let mut previous: Option<&Block> = None;

    for (block, result) in blocks.iter().zip(results) {
        if result.content.is_empty() {
            continue;
        }
        if let Some(prev) = previous {
            output.push_str(if joins_tightly(prev, block) { "\n" } else { "\n\n" });
        }
        output.push_str(&result.content);
        previous = Some(block);
    }

    output
}

/// Items of one list kind, and rows of one table, sit on adjacent lines.
fn joins_tightly(previous: &Block, next: &Block) -> bool {
    previous.block_type() == next.block_type()
        && (next.is_list_item() || matches!(next, Block::TableRow(_)))
}

/// Formats Notion blocks as markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownBlockRenderer;

impl BlockRenderer for MarkdownBlockRenderer {
    fn render_block(
        &self,
        block: &Block,
        context: FormatContext,
    ) -> Result<BlockRenderResult, AppError> {
        let content = match block {
            Block::Paragraph(b) => self.format_text_with_children(&b.content, "", block, &context)?,
            Block::Heading1(b) => self.format_text_with_children(&b.content, "# ", block, &context)?,
            Block::Heading2(b) => {
                self.format_text_with_children(&b.content, "## ", block, &context)?
            }
            Block::Heading3(b) => {
                self.format_text_with_children(&b.content, "### ", block, &context)?
            }
            Block::BulletedListItem(b) => self.format_list_item("- ", &b.content, block, &context)?,
            Block::NumberedListItem(b) => {
                let marker = format!("{}. ", context.current_list_number());
                self.format_list_item(&marker, &b.content, block, &context)?
            }
            Block::ToDo(b) => {
                let marker = if b.checked { "- [x] " } else { "- [ ] " };
                self.format_list_item(marker, &b.content, block, &context)?
            }
            Block::Toggle(b) => self.format_toggle(b, &context)?,
            Block::Quote(b) => {
                let body = self.format_text_with_children(&b.content, "", block, &context)?;
                quote_lines(&body)
            }
            Block::Callout(b) => self.format_callout(b, &context)?,
            Block::Code(b) => format_code_block(b),
            Block::Equation(b) => format!("$$\n{}\n$$", b.expression),
            Block::Divider(_) => "---".to_string(),
            Block::Image(b) => {
                format!("![{}]({})", rich_text_to_plain(&b.caption), b.source.url())
            }
            Block::Video(b) => format_link(&b.caption, "video", b.source.url()),
            Block::File(b) => format_link(&b.caption, "file", b.source.url()),
            Block::Pdf(b) => format_link(&b.caption, "pdf", b.source.url()),
            Block::Bookmark(b) => format_link(&b.caption, &b.url, &b.url),
            Block::Embed(b) | Block::LinkPreview(b) => format!("[{}]({})", b.url, b.url),
            Block::ChildPage(b) => format!("📄 [[{}]]", b.title),
            Block::Table(_) => {
                let children = block.children();
                let rows = self.render_children(children, context.enter_table())?;
                join_rendered(children, &rows)
            }
            Block::TableRow(b) => format_table_row(b, &context),
            Block::ColumnList(_) | Block::Column(_) => {
                self.format_children(block.children(), context.enter_children())?
            }
            Block::Unsupported(b) if block.children().is_empty() => {
                log::debug!("Skipping unsupported block type '{}'", b.block_type);
                String::new()
            }
            Block::Unsupported(b) => {
                log::debug!("Rendering children of unsupported '{}' block", b.block_type);
                self.format_children(block.children(), context.enter_children())?
            }
        };

        let next_context = match block {
            // Nothing was emitted, so a surrounding numbered run carries on.
            Block::Unsupported(_) if content.is_empty() => context,
            Block::NumberedListItem(_) => context.increment_list_number(),
            Block::TableRow(_) => context.process_table_row(),
            _ => context.reset_list(),
        };

        Ok(BlockRenderResult {
            content,
            context: next_context,
        })
    }
}

impl MarkdownBlockRenderer {
    /// Render and join sibling blocks.
    pub fn format_children(
        &self,
        children: &[Block],
        context: FormatContext,
    ) -> Result<String, AppError> {
        if children.is_empty() {
            return Ok(String::new());
        }
        let results = self.render_children(children, context)?;
        Ok(join_rendered(children, &results))
    }

    /// Prefixed text, then the block's children after a blank line.
    fn format_text_with_children(
        &self,
        content: &TextBlockContent,
        prefix: &str,
        block: &Block,
        context: &FormatContext,
    ) -> Result<String, AppError> {
        let text = format!("{}{}", prefix, rich_text_to_markdown(&content.rich_text));
        let children = self.format_children(block.children(), context.enter_children())?;
        Ok(if children.is_empty() {
            text
        } else {
            format!("{}\n\n{}", text, children)
        })
    }

    /// A list marker line with the item's children indented under it.
    fn format_list_item(
        &self,
        marker: &str,
        content: &TextBlockContent,
        block: &Block,
        context: &FormatContext,
    ) -> Result<String, AppError> {
        let line = format!("{}{}", marker, rich_text_to_markdown(&content.rich_text));
        let children = self.format_children(block.children(), context.enter_children())?;
        Ok(if children.is_empty() {
            line
        } else {
            format!("{}\n{}", line, indent_lines(&children, LIST_CHILD_INDENT))
        })
    }

    fn format_toggle(&self, b: &ToggleBlock, context: &FormatContext) -> Result<String, AppError> {
        let summary = rich_text_to_markdown(&b.content.rich_text);
        let children = self.format_children(&b.common.children, context.enter_children())?;
        Ok(if children.is_empty() {
            format!("<details>\n<summary>{}</summary>\n</details>", summary)
        } else {
            format!(
                "<details>\n<summary>{}</summary>\n\n{}\n\n</details>",
                summary, children
            )
        })
    }

    fn format_callout(&self, b: &CalloutBlock, context: &FormatContext) -> Result<String, AppError> {
        let icon = match &b.icon {
            Some(Icon::Emoji(emoji)) => format!("{} ", emoji),
            _ => String::new(),
        };
        let text = format!("{}{}", icon, rich_text_to_markdown(&b.content.rich_text));
        let children = self.format_children(&b.common.children, context.enter_children())?;
        let body = if children.is_empty() {
            text
        } else {
            format!("{}\n\n{}", text, children)
        };
        Ok(quote_lines(&body))
    }
}

fn format_code_block(code: &CodeBlock) -> String {
    let language = match code.language.as_str() {
        "plain text" => "text",
        other => other,
    };
    let source = rich_text_to_plain(&code.content.rich_text);
    let mut result = format!("```{}\n{}\n```", language, source);
    if !code.caption.is_empty() {
        result.push_str(&format!("\n*{}*", rich_text_to_markdown(&code.caption)));
    }
    result
}

/// `[caption](url)`, or `[fallback](url)` without a caption.
fn format_link(caption: &[RichTextItem], fallback: &str, url: &str) -> String {
    let text = rich_text_to_plain(caption);
    if text.is_empty() {
        format!("[{}]({})", fallback, url)
    } else {
        format!("[{}]({})", text, url)
    }
}

/// A pipe-table row; the first row of a table is followed by the separator.
fn format_table_row(row: &TableRowBlock, context: &FormatContext) -> String {
    let cells: Vec<String> = row
        .cells
        .iter()
        .map(|cell| rich_text_to_markdown(cell).replace('|', "\\|"))
        .collect();
    let mut line = format!("| {} |", cells.join(" | "));

    if context.is_first_table_row() {
        line.push('\n');
        line.push('|');
        line.push_str(&" --- |".repeat(row.cells.len()));
    }
    line
}

/// Indents each non-empty line of `text` by `indent`, preserving blank lines.
fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn common(children: Vec<Block>) -> BlockCommon {
        BlockCommon::default().with_children(children)
    }

    fn numbered(text: &str, children: Vec<Block>) -> Block {
        Block::NumberedListItem(NumberedListItemBlock {
            common: common(children),
            content: TextBlockContent::plain(text),
        })
    }

    fn bulleted(text: &str, children: Vec<Block>) -> Block {
        Block::BulletedListItem(BulletedListItemBlock {
            common: common(children),
            content: TextBlockContent::plain(text),
        })
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: common(vec![]),
            content: TextBlockContent::plain(text),
        })
    }

    fn render(blocks: &[Block]) -> String {
        MarkdownBlockRenderer
            .format_children(blocks, FormatContext::new())
            .unwrap()
    }

    #[test]
    fn list_children_are_indented() {
        let block = numbered(
            "Managing complex use cases",
            vec![
                bulleted("Document analysis workflows", vec![]),
                bulleted("Legal/compliance requirements", vec![]),
            ],
        );

        assert_eq!(
            render(&[block]),
            "1. Managing complex use cases\n   - Document analysis workflows\n   - Legal/compliance requirements"
        );
    }

    #[test]
    fn deeply_nested_lists_indent_further() {
        let block = numbered(
            "Level 1",
            vec![bulleted("Level 2", vec![bulleted("Level 3", vec![])])],
        );
        assert_eq!(render(&[block]), "1. Level 1\n   - Level 2\n      - Level 3");
    }

    #[test]
    fn numbering_restarts_after_other_blocks() {
        let blocks = vec![
            numbered("one", vec![]),
            numbered("two", vec![]),
            paragraph("break"),
            numbered("again", vec![]),
        ];
        assert_eq!(render(&blocks), "1. one\n2. two\n\nbreak\n\n1. again");
    }

    #[test]
    fn unsupported_blocks_are_skipped() {
        let blocks = vec![
            paragraph("before"),
            Block::Unsupported(UnsupportedBlock {
                common: common(vec![]),
                block_type: "synced_block".to_string(),
            }),
            paragraph("after"),
        ];
        assert_eq!(render(&blocks), "before\n\nafter");
    }

    #[test]
    fn unsupported_container_renders_its_children() {
        let synced = Block::Unsupported(UnsupportedBlock {
            common: common(vec![paragraph("shared content"), bulleted("point", vec![])]),
            block_type: "synced_block".to_string(),
        });
        let blocks = vec![paragraph("intro"), synced, paragraph("outro")];
        assert_eq!(
            render(&blocks),
            "intro\n\nshared content\n\n- point\n\noutro"
        );
    }

    #[test]
    fn numbering_continues_over_skipped_blocks() {
        let blocks = vec![
            numbered("a", vec![]),
            Block::Unsupported(UnsupportedBlock {
                common: common(vec![]),
                block_type: "breadcrumb".to_string(),
            }),
            numbered("b", vec![]),
        ];
        assert_eq!(render(&blocks), "1. a\n2. b");
    }

    #[test]
    fn table_gets_separator_after_first_row() {
        let row = |a: &str, b: &str| {
            Block::TableRow(TableRowBlock {
                common: common(vec![]),
                cells: vec![
                    vec![RichTextItem::plain_text(a)],
                    vec![RichTextItem::plain_text(b)],
                ],
            })
        };
        let table = Block::Table(TableBlock {
            common: common(vec![row("Name", "Value"), row("a|b", "1"), row("c", "2")]),
            table_width: 2,
            has_column_header: true,
        });

        assert_eq!(
            render(&[table]),
            "| Name | Value |\n| --- | --- |\n| a\\|b | 1 |\n| c | 2 |"
        );
    }

    #[test]
    fn toggle_wraps_children_in_details() {
        let toggle = Block::Toggle(ToggleBlock {
            common: common(vec![paragraph("hidden")]),
            content: TextBlockContent::plain("Click me"),
        });
        assert_eq!(
            render(&[toggle]),
            "<details>\n<summary>Click me</summary>\n\nhidden\n\n</details>"
        );
    }

    #[test]
    fn callout_is_quoted_with_emoji() {
        let callout = Block::Callout(CalloutBlock {
            common: common(vec![paragraph("more")]),
            icon: Some(Icon::Emoji("💡".to_string())),
            content: TextBlockContent::plain("Tip"),
        });
        assert_eq!(render(&[callout]), "> 💡 Tip\n>\n> more");
    }

    #[test]
    fn code_block_is_fenced() {
        let code = Block::Code(CodeBlock {
            common: common(vec![]),
            language: "rust".to_string(),
            caption: vec![],
            content: TextBlockContent::plain("fn main() {}"),
        });
        assert_eq!(render(&[code]), "```rust\nfn main() {}\n```");
    }
}
