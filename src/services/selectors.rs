//! Extraction rule table for old-Reddit markup.
//!
//! Listing pages enumerate posts as `div.thing` nodes whose coarse
//! attributes (`data-kind`, `data-promoted`, `data-permalink`) drive
//! filtering. Detail pages repeat the post as the first `div.thing` inside
//! the first `div.sitetable`, which carries the numeric attributes.

/// One post entry on a listing page.
pub const LISTING_THING: &str = "div.thing";

/// First content table on a detail page; all detail fields live under it.
pub const SITETABLE: &str = "div.sitetable";

/// The post node inside the content table, carrying the data attributes.
pub const DETAIL_THING: &str = "div.thing";

/// Title anchor on a detail page.
pub const DETAIL_TITLE: &str = "p.title a.title";

/// Body text node on a detail page (absent for image/link posts).
pub const DETAIL_BODY: &str = "div.usertext-body";

/// Anchor of the "next" pagination button on a listing page.
pub const NEXT_PAGE: &str = "div.nav-buttons span.next-button a";

/// Attribute holding the relative permalink of a listed post.
pub const ATTR_PERMALINK: &str = "data-permalink";

/// Attribute distinguishing post kinds ("video" entries are skipped).
pub const ATTR_KIND: &str = "data-kind";

/// Attribute marking promoted (ad) entries.
pub const ATTR_PROMOTED: &str = "data-promoted";

/// Class marking stickied posts on a listing page.
pub const CLASS_STICKIED: &str = "stickied";

/// Numeric detail attributes, all required on the detail-page thing node.
pub const ATTR_TIMESTAMP: &str = "data-timestamp";
pub const ATTR_AUTHOR: &str = "data-author";
pub const ATTR_SCORE: &str = "data-score";
pub const ATTR_COMMENTS: &str = "data-comments-count";
