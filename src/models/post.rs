//! Post data structure.

use serde::{Deserialize, Serialize};

/// A text post extracted from a detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Body text (always non-empty for an emitted post)
    pub text: String,

    /// Author username
    pub author: String,

    /// Vote score at scrape time
    pub score: i64,

    /// Number of comments at scrape time
    pub comments_count: i64,

    /// Epoch timestamp as found in the page markup
    pub timestamp: i64,
}
