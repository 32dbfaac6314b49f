// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. Post listing asks for exactly one page of
/// this size and never follows the cursor; block children are followed to
/// the end.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Notion API version sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Default base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

// ---------------------------------------------------------------------------
// Blog database schema
// ---------------------------------------------------------------------------

/// Checkbox property gating which rows are listed.
pub const PUBLISHED_PROPERTY: &str = "Published";

/// Date property used to order the listing, newest first.
pub const DATE_PROPERTY: &str = "Date";

/// Formula property holding the post slug.
pub const SLUG_PROPERTY: &str = "Slug";

pub const TITLE_PROPERTY: &str = "Title";
pub const DESCRIPTION_PROPERTY: &str = "Description";
pub const TAGS_PROPERTY: &str = "Tags";

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Posts per listing page when no override is configured.
pub const POSTS_PER_PAGE: usize = 4;

/// Posts shown by the top page listing.
pub const TOP_PAGE_POSTS: usize = 4;

// ---------------------------------------------------------------------------
// Markdown conversion boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth when walking a page's block tree.
///
/// Notion blocks can nest arbitrarily deep (toggles in lists in columns).
/// Children below this depth are not fetched.
pub const BLOCK_MAX_FETCH_DEPTH: usize = 20;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

/// Indentation for children nested under a list item.
pub const LIST_CHILD_INDENT: &str = "   ";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
