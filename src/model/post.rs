use serde::{Deserialize, Serialize};

/// A database row exactly as the Notion query endpoint returns it.
///
/// Every property value sits inside a type-tagged envelope
/// (`{"title": [...]}`, `{"multi_select": [...]}`), so rows stay untyped JSON
/// until the post transform or the post schema reads them.
pub type RawRow = serde_json::Value;

/// Flat metadata for one blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    /// ISO-8601 date as stored in the `Date` property
    pub date: String,
    pub slug: String,
    pub tags: Vec<String>,
}

impl PostMetadata {
    /// The publication date, when `date` is a plain `YYYY-MM-DD` or a full timestamp.
    pub fn published_on(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                chrono::DateTime::parse_from_rfc3339(&self.date)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A single post: its metadata plus the rendered body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub metadata: PostMetadata,
    pub markdown: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(date: &str, tags: &[&str]) -> PostMetadata {
        PostMetadata {
            id: "1".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            date: date.to_string(),
            slug: "s".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn published_on_accepts_dates_and_timestamps() {
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(metadata("2024-01-01", &[]).published_on(), expected);
        assert_eq!(
            metadata("2024-01-01T09:30:00.000+09:00", &[]).published_on(),
            expected
        );
        assert_eq!(metadata("soon", &[]).published_on(), None);
    }

    #[test]
    fn tag_match_is_exact_and_case_sensitive() {
        let post = metadata("2024-01-01", &["Rust", "web"]);
        assert!(post.has_tag("Rust"));
        assert!(!post.has_tag("rust"));
        assert!(!post.has_tag("Ru"));
    }
}
