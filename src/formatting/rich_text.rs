// src/formatting/rich_text.rs
//! Rich text spans to inline markdown.
//!
//! Each span becomes a [`TextSegment`]: its content plus a [`TextStyle`]
//! derived from the annotations. Styles are applied innermost first: code,
//! strikethrough, bold, italic, underline, then the link.

use crate::types::{Annotations, Link, RichTextItem, RichTextType};

/// A span reduced to what the markdown output needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    pub content: TextContent,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextContent {
    Plain(String),
    /// Inline equation, rendered as `$expr$` and never styled.
    Equation(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub link: Option<String>,
}

impl From<&Annotations> for TextStyle {
    fn from(annotations: &Annotations) -> Self {
        Self {
            bold: annotations.bold,
            italic: annotations.italic,
            strikethrough: annotations.strikethrough,
            underline: annotations.underline,
            code: annotations.code,
            link: None,
        }
    }
}

/// Renders spans to inline markdown.
pub fn rich_text_to_markdown(items: &[RichTextItem]) -> String {
    items
        .iter()
        .map(to_segment)
        .map(|segment| render_segment(&segment))
        .collect()
}

/// Concatenated `plain_text` of the spans, with no markup.
pub fn rich_text_to_plain(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}

fn to_segment(item: &RichTextItem) -> TextSegment {
    let mut style = TextStyle::from(&item.annotations);
    style.link = item.href.clone();

    let content = match &item.text_type {
        RichTextType::Text { content, link } => {
            if let Some(Link { url }) = link {
                style.link = Some(url.clone());
            }
            TextContent::Plain(content.clone())
        }
        RichTextType::Mention => TextContent::Plain(item.plain_text.clone()),
        RichTextType::Equation { expression } => TextContent::Equation(expression.clone()),
    };

    TextSegment { content, style }
}

fn render_segment(segment: &TextSegment) -> String {
    match &segment.content {
        TextContent::Plain(text) => MarkdownStyleRenderer::apply_styles(text, &segment.style),
        TextContent::Equation(expression) => format!("${}$", expression),
    }
}

pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Wraps `content` in markdown for `style`.
    ///
    /// Emphasis markers hug the text: leading and trailing whitespace stays
    /// outside them, since `** bold**` is not bold in markdown.
    pub fn apply_styles(content: &str, style: &TextStyle) -> String {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return content.to_string();
        }
        let start = content.len() - content.trim_start().len();
        let leading = &content[..start];
        let trailing = &content[start + trimmed.len()..];

        let mut result = trimmed.to_string();

        if style.code {
            result = format!("`{}`", result);
        }
        if style.strikethrough {
            result = format!("~~{}~~", result);
        }
        if style.bold {
            result = format!("**{}**", result);
        }
        if style.italic {
            result = format!("*{}*", result);
        }
        if style.underline {
            result = format!("<u>{}</u>", result);
        }
        if let Some(url) = &style.link {
            result = format!("[{}]({})", result, url);
        }

        format!("{}{}{}", leading, result, trailing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn styled(text: &str, annotations: Annotations) -> RichTextItem {
        RichTextItem::plain_text(text).with_annotations(annotations)
    }

    #[test]
    fn plain_text_is_untouched() {
        let items = vec![RichTextItem::plain_text("Hello World")];
        assert_eq!(rich_text_to_markdown(&items), "Hello World");
    }

    #[test]
    fn bold_italic_nest() {
        let items = vec![styled(
            "Bold Italic",
            Annotations {
                bold: true,
                italic: true,
                ..Default::default()
            },
        )];
        assert_eq!(rich_text_to_markdown(&items), "***Bold Italic***");
    }

    #[test]
    fn code_is_innermost() {
        let style = TextStyle {
            code: true,
            bold: true,
            ..Default::default()
        };
        assert_eq!(MarkdownStyleRenderer::apply_styles("x", &style), "**`x`**");
    }

    #[test]
    fn whitespace_stays_outside_markers() {
        let items = vec![
            RichTextItem::plain_text("a"),
            styled(
                " strong ",
                Annotations {
                    bold: true,
                    ..Default::default()
                },
            ),
            RichTextItem::plain_text("b"),
        ];
        assert_eq!(rich_text_to_markdown(&items), "a **strong** b");
    }

    #[test]
    fn underline_and_link() {
        let items = vec![styled(
            "docs",
            Annotations {
                underline: true,
                ..Default::default()
            },
        )
        .with_link("https://docs.rs")];
        assert_eq!(rich_text_to_markdown(&items), "[<u>docs</u>](https://docs.rs)");
    }

    #[test]
    fn equations_render_inline() {
        let items = vec![RichTextItem {
            text_type: RichTextType::Equation {
                expression: "E = mc^2".to_string(),
            },
            annotations: Annotations {
                bold: true,
                ..Default::default()
            },
            plain_text: "E = mc^2".to_string(),
            href: None,
        }];
        assert_eq!(rich_text_to_markdown(&items), "$E = mc^2$");
    }

    #[test]
    fn mention_uses_plain_text_and_href() {
        let items = vec![RichTextItem {
            text_type: RichTextType::Mention,
            annotations: Annotations::default(),
            plain_text: "Other post".to_string(),
            href: Some("https://www.notion.so/abc".to_string()),
        }];
        assert_eq!(
            rich_text_to_markdown(&items),
            "[Other post](https://www.notion.so/abc)"
        );
        assert_eq!(rich_text_to_plain(&items), "Other post");
    }
}
