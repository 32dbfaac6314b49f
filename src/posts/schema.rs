// src/posts/schema.rs
//! Declarative post schema.
//!
//! A row is a post when every rule in [`POST_SCHEMA`] holds. Validation
//! returns a typed proof ([`ValidatedRow`]) or the first violated rule.

use super::transform::{metadata_from_row, RowReadError};
use crate::constants::{
    DATE_PROPERTY, DESCRIPTION_PROPERTY, SLUG_PROPERTY, TAGS_PROPERTY, TITLE_PROPERTY,
};
use crate::model::{PostMetadata, RawRow};
use serde_json::Value;
use thiserror::Error;

/// What a property envelope must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A non-empty span list whose first span has a string `plain_text`.
    Spans,
    /// An object with a string `start`.
    DateStart,
    /// A list (possibly empty) of objects with string `name`s.
    NamedOptions,
}

/// One property requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub property: &'static str,
    pub envelope: &'static str,
    pub shape: Shape,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("row 'id' is missing or not a string")]
    MissingId,

    #[error("row has no 'properties' object")]
    MissingProperties,

    #[error("property '{0}' is missing")]
    MissingProperty(&'static str),

    #[error("property '{property}' has no '{envelope}' value")]
    MissingEnvelope {
        property: &'static str,
        envelope: &'static str,
    },

    #[error("property '{property}' should be {expected}")]
    WrongType {
        property: &'static str,
        expected: &'static str,
    },

    #[error("property '{0}' has no text spans")]
    TooFewSpans(&'static str),
}

/// A table of field rules plus the row-level `id` requirement.
#[derive(Debug)]
pub struct PostSchema {
    rules: &'static [FieldRule],
}

/// The blog database's post shape.
pub static POST_SCHEMA: PostSchema = PostSchema {
    rules: &[
        FieldRule {
            property: TITLE_PROPERTY,
            envelope: "title",
            shape: Shape::Spans,
        },
        FieldRule {
            property: DESCRIPTION_PROPERTY,
            envelope: "rich_text",
            shape: Shape::Spans,
        },
        FieldRule {
            property: DATE_PROPERTY,
            envelope: "date",
            shape: Shape::DateStart,
        },
        FieldRule {
            property: SLUG_PROPERTY,
            envelope: "rich_text",
            shape: Shape::Spans,
        },
        FieldRule {
            property: TAGS_PROPERTY,
            envelope: "multi_select",
            shape: Shape::NamedOptions,
        },
    ],
};

/// A row that passed [`PostSchema::validate`].
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRow<'a> {
    row: &'a RawRow,
}

impl<'a> ValidatedRow<'a> {
    pub fn row(&self) -> &'a RawRow {
        self.row
    }

    pub fn metadata(&self) -> Result<PostMetadata, RowReadError> {
        metadata_from_row(self.row)
    }
}

impl PostSchema {
    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    pub fn validate<'a>(&self, row: &'a RawRow) -> Result<ValidatedRow<'a>, SchemaViolation> {
        if !row.get("id").is_some_and(Value::is_string) {
            return Err(SchemaViolation::MissingId);
        }

        let properties = row
            .get("properties")
            .and_then(Value::as_object)
            .ok_or(SchemaViolation::MissingProperties)?;

        for rule in self.rules {
            let property = properties
                .get(rule.property)
                .ok_or(SchemaViolation::MissingProperty(rule.property))?;
            let value = property
                .get(rule.envelope)
                .filter(|v| !v.is_null())
                .ok_or(SchemaViolation::MissingEnvelope {
                    property: rule.property,
                    envelope: rule.envelope,
                })?;
            rule.check(value)?;
        }

        Ok(ValidatedRow { row })
    }
}

impl FieldRule {
    fn check(&self, value: &Value) -> Result<(), SchemaViolation> {
        let wrong_type = |expected| SchemaViolation::WrongType {
            property: self.property,
            expected,
        };

        match self.shape {
            Shape::Spans => {
                let spans = value.as_array().ok_or_else(|| wrong_type("a span list"))?;
                let first = spans
                    .first()
                    .ok_or(SchemaViolation::TooFewSpans(self.property))?;
                if !first.get("plain_text").is_some_and(Value::is_string) {
                    return Err(wrong_type("spans with string plain_text"));
                }
            }
            Shape::DateStart => {
                if !value.get("start").is_some_and(Value::is_string) {
                    return Err(wrong_type("a date with a string start"));
                }
            }
            Shape::NamedOptions => {
                let options = value.as_array().ok_or_else(|| wrong_type("an option list"))?;
                if !options
                    .iter()
                    .all(|option| option.get("name").is_some_and(Value::is_string))
                {
                    return Err(wrong_type("options with string names"));
                }
            }
        }
        Ok(())
    }
}
