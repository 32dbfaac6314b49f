// src/posts/transform.rs
//! Row to metadata transform.
//!
//! Reads a raw database row through JSON pointers into its property
//! envelopes. This is the unchecked path used for bulk listing: it reports
//! the first field it cannot read and does not look any further.

use crate::constants::{
    DATE_PROPERTY, DESCRIPTION_PROPERTY, SLUG_PROPERTY, TAGS_PROPERTY, TITLE_PROPERTY,
};
use crate::model::{PostMetadata, RawRow};
use serde_json::Value;
use thiserror::Error;

/// Why a row could not be read as post metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowReadError {
    #[error("row has no string id")]
    MissingId,

    #[error("property '{property}' has no readable '{field}'")]
    Missing {
        property: &'static str,
        field: &'static str,
    },

    #[error("property '{0}' has no text spans")]
    NoSpans(&'static str),
}

/// Builds post metadata from a raw row.
///
/// Title, description and slug take the first span's `plain_text`; the date
/// is `Date.date.start` verbatim; tags keep order and duplicates.
pub fn metadata_from_row(row: &RawRow) -> Result<PostMetadata, RowReadError> {
    let id = row
        .get("id")
        .and_then(Value::as_str)
        .ok_or(RowReadError::MissingId)?;

    Ok(PostMetadata {
        id: id.to_string(),
        title: first_span_text(row, TITLE_PROPERTY, "title")?,
        description: first_span_text(row, DESCRIPTION_PROPERTY, "rich_text")?,
        date: date_start(row)?,
        slug: first_span_text(row, SLUG_PROPERTY, "rich_text")?,
        tags: tag_names(row)?,
    })
}

fn envelope<'a>(row: &'a RawRow, property: &str, envelope: &str) -> Option<&'a Value> {
    row.pointer(&format!("/properties/{}/{}", property, envelope))
}

fn first_span_text(
    row: &RawRow,
    property: &'static str,
    kind: &'static str,
) -> Result<String, RowReadError> {
    let spans = envelope(row, property, kind)
        .and_then(Value::as_array)
        .ok_or(RowReadError::Missing {
            property,
            field: kind,
        })?;

    let first = spans.first().ok_or(RowReadError::NoSpans(property))?;

    first
        .get("plain_text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RowReadError::Missing {
            property,
            field: "plain_text",
        })
}

fn date_start(row: &RawRow) -> Result<String, RowReadError> {
    envelope(row, DATE_PROPERTY, "date")
        .and_then(|date| date.get("start"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RowReadError::Missing {
            property: DATE_PROPERTY,
            field: "start",
        })
}

fn tag_names(row: &RawRow) -> Result<Vec<String>, RowReadError> {
    let options = envelope(row, TAGS_PROPERTY, "multi_select")
        .and_then(Value::as_array)
        .ok_or(RowReadError::Missing {
            property: TAGS_PROPERTY,
            field: "multi_select",
        })?;

    options
        .iter()
        .map(|option| {
            option
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(RowReadError::Missing {
                    property: TAGS_PROPERTY,
                    field: "name",
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row() -> Value {
        json!({
            "object": "page",
            "id": "0c6b3a4e-8d41-4f3a-9a6e-6f1e3b1f2a10",
            "properties": {
                "Title": { "id": "title", "type": "title", "title": [
                    { "type": "text", "plain_text": "Hello" },
                    { "type": "text", "plain_text": " ignored" }
                ] },
                "Description": { "type": "rich_text", "rich_text": [ { "plain_text": "World" } ] },
                "Date": { "type": "date", "date": { "start": "2024-01-01", "end": null } },
                "Slug": { "type": "rich_text", "rich_text": [ { "plain_text": "hello" } ] },
                "Tags": { "type": "multi_select", "multi_select": [
                    { "id": "1", "name": "a", "color": "red" },
                    { "id": "2", "name": "b", "color": "blue" }
                ] },
                "Published": { "type": "checkbox", "checkbox": true }
            }
        })
    }

    #[test]
    fn reads_first_span_of_each_text_property() {
        let metadata = metadata_from_row(&row()).unwrap();
        assert_eq!(
            metadata,
            PostMetadata {
                id: "0c6b3a4e-8d41-4f3a-9a6e-6f1e3b1f2a10".to_string(),
                title: "Hello".to_string(),
                description: "World".to_string(),
                date: "2024-01-01".to_string(),
                slug: "hello".to_string(),
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn duplicate_tags_are_kept() {
        let mut row = row();
        row["properties"]["Tags"]["multi_select"] =
            json!([{ "name": "rust" }, { "name": "rust" }]);
        let metadata = metadata_from_row(&row).unwrap();
        assert_eq!(metadata.tags, vec!["rust", "rust"]);
    }

    #[test]
    fn empty_title_has_no_spans() {
        let mut row = row();
        row["properties"]["Title"]["title"] = json!([]);
        assert_eq!(
            metadata_from_row(&row),
            Err(RowReadError::NoSpans("Title"))
        );
    }

    #[test]
    fn missing_date_names_the_field() {
        let mut row = row();
        row["properties"]["Date"]["date"] = Value::Null;
        assert_eq!(
            metadata_from_row(&row),
            Err(RowReadError::Missing {
                property: "Date",
                field: "start"
            })
        );
    }

    #[test]
    fn row_without_id_is_rejected() {
        let mut row = row();
        row.as_object_mut().unwrap().remove("id");
        assert_eq!(metadata_from_row(&row), Err(RowReadError::MissingId));
    }

    #[test]
    fn tag_without_name_is_rejected() {
        let mut row = row();
        row["properties"]["Tags"]["multi_select"][1] = json!({ "id": "2", "color": "blue" });
        assert_eq!(
            metadata_from_row(&row),
            Err(RowReadError::Missing {
                property: "Tags",
                field: "name"
            })
        );
    }
}
