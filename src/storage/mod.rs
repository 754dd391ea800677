//! On-disk persistence: the fetched-page cache and the final output file.
//!
//! ## Directory Structure
//!
//! ```text
//! {cache_root}/
//! └── {subreddit}/
//!     ├── #                      # sanitized listing root "/"
//!     ├── #?count=25&after=...   # sanitized pagination targets
//!     └── #comments#abc#title#   # sanitized detail targets
//! ```
//!
//! Cache entries hold the exact raw fetched body and are immutable after the
//! first write (except under refresh mode). All writes go through a
//! temp-file-then-rename so a crash never leaves truncated content behind.

pub mod cache;
pub mod output;

// Re-export for convenience
pub use cache::PageCache;
pub use output::write_posts;
