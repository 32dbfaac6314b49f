// src/api/query.rs
//! Request bodies for the database query endpoint.
//!
//! Only the filter and sort shapes the blog needs are modelled; they
//! serialize to exactly what `POST /databases/{id}/query` expects.

use crate::constants::{
    DATE_PROPERTY, NOTION_API_PAGE_SIZE, PUBLISHED_PROPERTY, SLUG_PROPERTY,
};
use serde::Serialize;

/// A database query: optional filter, sort keys, and page size.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<PropertyFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl DatabaseQuery {
    /// Rows whose `Published` checkbox is ticked, newest `Date` first, one full page.
    pub fn published_posts() -> Self {
        Self {
            filter: Some(PropertyFilter::checkbox_equals(PUBLISHED_PROPERTY, true)),
            sorts: vec![Sort::descending(DATE_PROPERTY)],
            page_size: Some(NOTION_API_PAGE_SIZE),
        }
    }

    /// Rows whose `Slug` formula evaluates to `slug`.
    pub fn post_by_slug(slug: &str) -> Self {
        Self {
            filter: Some(PropertyFilter::formula_string_equals(SLUG_PROPERTY, slug)),
            ..Self::default()
        }
    }
}

/// A filter on one database property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyFilter {
    pub property: String,
    #[serde(flatten)]
    pub condition: FilterCondition,
}

impl PropertyFilter {
    pub fn checkbox_equals(property: &str, equals: bool) -> Self {
        Self {
            property: property.to_string(),
            condition: FilterCondition::Checkbox { equals },
        }
    }

    pub fn formula_string_equals(property: &str, equals: &str) -> Self {
        Self {
            property: property.to_string(),
            condition: FilterCondition::Formula {
                string: StringCondition {
                    equals: equals.to_string(),
                },
            },
        }
    }
}

/// The type-specific half of a property filter, keyed by property type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    Checkbox { equals: bool },
    Formula { string: StringCondition },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringCondition {
    pub equals: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn descending(property: &str) -> Self {
        Self {
            property: property.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Descending,
}
