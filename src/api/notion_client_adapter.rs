// src/api/notion_client_adapter.rs
//! Adapter layer for converting notion-client block types to the domain model.
//!
//! Only what the markdown renderer reads survives the conversion: colours,
//! mention targets and archive flags are dropped here.

use crate::error::{AppError, NotionClientError};
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::Block;
use crate::types::{Annotations, BlockId, Link, RichTextItem, RichTextType};

use notion_client::objects::block::{Block as NcBlock, BlockType, Icon as NcIcon};
use notion_client::objects::file::File as NcFile;
use notion_client::objects::rich_text::{Annotations as NcAnnotations, RichText as NcRichText};

/// Convert a notion-client block into a domain block without children.
pub fn convert_block(notion_block: NcBlock) -> Result<Block, AppError> {
    let common = convert_block_common(&notion_block)?;

    let block = match notion_block.block_type {
        BlockType::Paragraph { paragraph } => Block::Paragraph(ParagraphBlock {
            common,
            content: text_content(paragraph.rich_text)?,
        }),

        BlockType::Heading1 { heading_1 } => Block::Heading1(Heading1Block {
            common,
            content: text_content(heading_1.rich_text)?,
        }),

        BlockType::Heading2 { heading_2 } => Block::Heading2(Heading2Block {
            common,
            content: text_content(heading_2.rich_text)?,
        }),

        BlockType::Heading3 { heading_3 } => Block::Heading3(Heading3Block {
            common,
            content: text_content(heading_3.rich_text)?,
        }),

        BlockType::BulletedListItem { bulleted_list_item } => {
            Block::BulletedListItem(BulletedListItemBlock {
                common,
                content: text_content(bulleted_list_item.rich_text)?,
            })
        }

        BlockType::NumberedListItem { numbered_list_item } => {
            Block::NumberedListItem(NumberedListItemBlock {
                common,
                content: text_content(numbered_list_item.rich_text)?,
            })
        }

        BlockType::ToDo { to_do } => Block::ToDo(ToDoBlock {
            common,
            content: text_content(to_do.rich_text)?,
            checked: to_do.checked.unwrap_or(false),
        }),

        BlockType::Toggle { toggle } => Block::Toggle(ToggleBlock {
            common,
            content: text_content(toggle.rich_text)?,
        }),

        BlockType::Quote { quote } => Block::Quote(QuoteBlock {
            common,
            content: text_content(quote.rich_text)?,
        }),

        BlockType::Callout { callout } => Block::Callout(CalloutBlock {
            common,
            icon: callout.icon.map(convert_icon),
            content: text_content(callout.rich_text)?,
        }),

        BlockType::Code { code } => Block::Code(CodeBlock {
            common,
            language: language_tag(&code.language),
            caption: convert_rich_text_array(code.caption)?,
            content: text_content(code.rich_text)?,
        }),

        BlockType::Equation { equation } => Block::Equation(EquationBlock {
            common,
            expression: equation.expression,
        }),

        BlockType::Divider { .. } => Block::Divider(DividerBlock { common }),

        // Image and video values carry no caption in notion-client.
        BlockType::Image { image } => Block::Image(MediaBlock {
            common,
            source: convert_file_object(image.file_type),
            caption: Vec::new(),
        }),

        BlockType::Video { video } => Block::Video(MediaBlock {
            common,
            source: convert_file_object(video.file_type),
            caption: Vec::new(),
        }),

        BlockType::File { file } => Block::File(MediaBlock {
            common,
            source: convert_file_object(file.file_type),
            caption: convert_rich_text_array(file.caption)?,
        }),

        BlockType::Pdf { pdf } => Block::Pdf(MediaBlock {
            common,
            source: convert_file_object(pdf.file_type),
            caption: convert_rich_text_array(pdf.caption)?,
        }),

        BlockType::Bookmark { bookmark } => Block::Bookmark(BookmarkBlock {
            common,
            url: bookmark.url,
            caption: convert_rich_text_array(bookmark.caption)?,
        }),

        BlockType::Embed { embed } => Block::Embed(UrlBlock {
            common,
            url: embed.url,
        }),

        BlockType::LinkPreview { link_preview } => Block::LinkPreview(UrlBlock {
            common,
            url: link_preview.url,
        }),

        BlockType::ChildPage { child_page } => Block::ChildPage(ChildPageBlock {
            common,
            title: child_page.title,
        }),

        BlockType::Table { table } => Block::Table(TableBlock {
            common,
            table_width: table.table_width as usize,
            has_column_header: table.has_column_header,
        }),

        BlockType::TableRow { table_row } => Block::TableRow(TableRowBlock {
            common,
            cells: table_row
                .cells
                .into_iter()
                .map(convert_rich_text_array)
                .collect::<Result<Vec<_>, _>>()?,
        }),

        BlockType::ColumnList { .. } => Block::ColumnList(LayoutBlock { common }),

        BlockType::Column { .. } => Block::Column(LayoutBlock { common }),

        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: block_type_name(&other),
        }),
    };

    Ok(block)
}

fn convert_block_common(notion_block: &NcBlock) -> Result<BlockCommon, AppError> {
    let raw_id = notion_block
        .id
        .as_deref()
        .ok_or_else(|| NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        })?;

    Ok(BlockCommon {
        id: BlockId::parse(raw_id)?,
        children: Vec::new(),
        has_children: notion_block.has_children.unwrap_or(false),
    })
}

/// The wire name of a block type, e.g. `synced_block`.
fn block_type_name(block_type: &BlockType) -> String {
    serde_json::to_value(block_type)
        .ok()
        .and_then(|value| value.get("type").and_then(|t| t.as_str()).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Code languages as Notion spells them, e.g. `rust` or `plain text`.
fn language_tag<L>(language: &L) -> String
where
    L: serde::Serialize + std::fmt::Debug,
{
    serde_json::to_value(language)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", language).to_lowercase())
}

fn text_content(rich_text: Vec<NcRichText>) -> Result<TextBlockContent, AppError> {
    Ok(TextBlockContent {
        rich_text: convert_rich_text_array(rich_text)?,
    })
}

fn convert_rich_text_array(rich_texts: Vec<NcRichText>) -> Result<Vec<RichTextItem>, AppError> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

fn convert_rich_text(rich_text: NcRichText) -> Result<RichTextItem, AppError> {
    match rich_text {
        NcRichText::Text {
            text,
            annotations,
            plain_text,
            href,
        } => {
            let plain_text = plain_text.unwrap_or_else(|| text.content.clone());
            Ok(RichTextItem {
                text_type: RichTextType::Text {
                    content: text.content,
                    link: text.link.map(|link| Link { url: link.url }),
                },
                annotations: convert_annotations(annotations.unwrap_or_default()),
                plain_text,
                href,
            })
        }

        NcRichText::Mention {
            annotations,
            plain_text,
            href,
            ..
        } => Ok(RichTextItem {
            text_type: RichTextType::Mention,
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        }),

        NcRichText::Equation {
            equation,
            annotations,
            plain_text,
            href,
        } => Ok(RichTextItem {
            text_type: RichTextType::Equation {
                expression: equation.expression,
            },
            annotations: convert_annotations(annotations),
            plain_text,
            href,
        }),

        _ => {
            log::debug!("Dropping unsupported rich text span");
            Ok(RichTextItem::plain_text(""))
        }
    }
}

fn convert_annotations(annotations: NcAnnotations) -> Annotations {
    Annotations {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
    }
}

fn convert_file_object(file: NcFile) -> FileObject {
    match file {
        NcFile::External { external } => FileObject::External { url: external.url },
        NcFile::File { file } => FileObject::Hosted {
            url: file.url,
            expiry_time: Some(file.expiry_time),
        },
    }
}

fn convert_icon(icon: NcIcon) -> Icon {
    match icon {
        NcIcon::Emoji(notion_client::objects::emoji::Emoji::Emoji { emoji }) => Icon::Emoji(emoji),
        NcIcon::File(file) => Icon::Image(convert_file_object(file)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notion_block(block_type: &str, payload: serde_json::Value) -> NcBlock {
        let mut value = json!({
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "parent": { "type": "page_id", "page_id": "59833787-2cf9-4fdf-8782-e53db20768a5" },
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-07-06T19:41:00.000Z",
            "created_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
            "last_edited_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
            "has_children": false,
            "archived": false,
            "type": block_type,
        });
        value[block_type] = payload;
        serde_json::from_value(value).expect("fixture block should deserialize")
    }

    fn text_span(content: &str, bold: bool) -> serde_json::Value {
        json!({
            "type": "text",
            "text": { "content": content, "link": null },
            "annotations": {
                "bold": bold, "italic": false, "strikethrough": false,
                "underline": false, "code": false, "color": "default"
            },
            "plain_text": content,
            "href": null
        })
    }

    #[test]
    fn paragraph_keeps_annotations() {
        let block = notion_block(
            "paragraph",
            json!({ "rich_text": [text_span("Hello ", false), text_span("world", true)], "color": "default" }),
        );

        let Block::Paragraph(paragraph) = convert_block(block).unwrap() else {
            panic!("expected paragraph");
        };
        assert_eq!(paragraph.content.rich_text.len(), 2);
        assert!(paragraph.content.rich_text[1].annotations.bold);
        assert_eq!(paragraph.content.rich_text[1].plain_text, "world");
        assert_eq!(
            paragraph.common.id.to_dashed(),
            "c02fc1d3-db8b-45c5-a222-27595b15aea7"
        );
    }

    #[test]
    fn to_do_checked_flag_survives() {
        let block = notion_block(
            "to_do",
            json!({ "rich_text": [text_span("ship it", false)], "checked": true, "color": "default" }),
        );

        let Block::ToDo(to_do) = convert_block(block).unwrap() else {
            panic!("expected to_do");
        };
        assert!(to_do.checked);
    }

    #[test]
    fn external_image_keeps_url() {
        let block = notion_block(
            "image",
            json!({ "type": "external", "external": { "url": "https://example.com/cat.png" } }),
        );

        let Block::Image(image) = convert_block(block).unwrap() else {
            panic!("expected image");
        };
        assert_eq!(image.source.url(), "https://example.com/cat.png");
    }
}
