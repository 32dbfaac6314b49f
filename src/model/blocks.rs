use super::common::BlockCommon;
use crate::types::RichTextItem;
use serde::{Deserialize, Serialize};

/// Rich text carried by paragraph-like blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
}

impl TextBlockContent {
    pub fn plain(text: &str) -> Self {
        Self {
            rich_text: vec![RichTextItem::plain_text(text)],
        }
    }
}

/// Declares blocks whose payload is only rich text.
macro_rules! text_blocks {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
            pub struct $name {
                pub common: BlockCommon,
                pub content: TextBlockContent,
            }
        )*
    };
}

text_blocks!(
    /// Paragraph block
    ParagraphBlock,
    /// Heading 1 block
    Heading1Block,
    /// Heading 2 block
    Heading2Block,
    /// Heading 3 block
    Heading3Block,
    /// Bulleted list item block
    BulletedListItemBlock,
    /// Numbered list item block
    NumberedListItemBlock,
    /// Toggle block
    ToggleBlock,
    /// Quote block
    QuoteBlock,
);

/// To-do block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<Icon>,
    pub content: TextBlockContent,
}

/// Callout icons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Icon {
    Emoji(String),
    /// Uploaded or external image icon; dropped from markdown.
    Image(FileObject),
}

/// Code block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub caption: Vec<RichTextItem>,
    pub content: TextBlockContent,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Divider block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerBlock {
    pub common: BlockCommon,
}

/// Image, video, file and PDF blocks share one shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub source: FileObject,
    pub caption: Vec<RichTextItem>,
}

/// Bookmark block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Embed and link preview blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// Child page block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Table block; rows arrive as children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Column list and column blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    pub common: BlockCommon,
}

/// Unsupported block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}

/// File object types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileObject {
    External { url: String },
    /// Notion-hosted file; the URL is signed and expires.
    Hosted {
        url: String,
        expiry_time: Option<chrono::DateTime<chrono::Utc>>,
    },
}

impl FileObject {
    pub fn url(&self) -> &str {
        match self {
            FileObject::External { url } | FileObject::Hosted { url, .. } => url,
        }
    }
}
