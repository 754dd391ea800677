//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Root URL for subreddit listing pages.
pub const LISTING_ROOT: &str = "https://old.reddit.com/r/";

/// Base URL for a subreddit: `{LISTING_ROOT}{subreddit}`.
pub fn base_url(subreddit: &str) -> String {
    format!("{LISTING_ROOT}{subreddit}")
}

/// Absolute URL for a relative target: `{base}{target}`.
pub fn target_url(subreddit: &str, target: &str) -> String {
    format!("{}{}", base_url(subreddit), target)
}

/// Resolve a potentially relative href against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Translate an absolute URL back into a relative target by stripping the
/// subreddit base prefix. Returns `None` if the URL points elsewhere.
pub fn relative_target(subreddit: &str, absolute: &str) -> Option<String> {
    absolute
        .strip_prefix(&base_url(subreddit))
        .map(|rest| rest.to_string())
}

/// Strip the subreddit prefix from a permalink to get a detail-page target.
///
/// Permalinks come as `/r/{subreddit}/comments/...`; the detail target is
/// relative to the subreddit base, i.e. `/comments/...`.
pub fn permalink_target(subreddit: &str, permalink: &str) -> String {
    let prefix = format!("/r/{subreddit}");
    permalink
        .strip_prefix(&prefix)
        .unwrap_or(permalink)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_url() {
        assert_eq!(target_url("rust", "/"), "https://old.reddit.com/r/rust/");
        assert_eq!(
            target_url("rust", "/?count=25&after=t3_abc"),
            "https://old.reddit.com/r/rust/?count=25&after=t3_abc"
        );
    }

    #[test]
    fn test_relative_target_round_trip() {
        let target = "/?count=25&after=t3_abc";
        let absolute = target_url("rust", target);
        assert_eq!(relative_target("rust", &absolute).as_deref(), Some(target));
    }

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://old.reddit.com/r/rust/").unwrap();
        assert_eq!(
            resolve_url(&base, "?count=25&after=t3_abc"),
            "https://old.reddit.com/r/rust/?count=25&after=t3_abc"
        );
        assert_eq!(
            resolve_url(&base, "https://old.reddit.com/r/rust/?after=t3_x"),
            "https://old.reddit.com/r/rust/?after=t3_x"
        );
    }

    #[test]
    fn test_relative_target_foreign_url() {
        assert!(relative_target("rust", "https://example.com/x").is_none());
    }

    #[test]
    fn test_permalink_target() {
        assert_eq!(
            permalink_target("rust", "/r/rust/comments/abc/title_slug/"),
            "/comments/abc/title_slug/"
        );
        // Already-relative permalinks pass through unchanged.
        assert_eq!(
            permalink_target("rust", "/comments/abc/"),
            "/comments/abc/"
        );
    }
}
