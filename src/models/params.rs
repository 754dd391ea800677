//! Per-run scrape parameters.

use std::path::PathBuf;

/// Parameters for a single scrape run, supplied by the CLI layer.
#[derive(Debug, Clone)]
pub struct ScrapeParams {
    /// Subreddit to scrape (without the `/r/` prefix)
    pub subreddit: String,

    /// Stop once this many text posts have been collected
    pub target_count: usize,

    /// Root directory for the on-disk page cache
    pub cache_dir: PathBuf,

    /// Pause after each real network fetch, in seconds (fractional allowed)
    pub politeness_secs: f64,

    /// Path for the final JSON output
    pub output: PathBuf,

    /// Bypass cache lookups and overwrite cached entries
    pub refresh: bool,

    /// Drop stickied posts from listing pages
    pub ignore_stickied: bool,
}

impl ScrapeParams {
    /// Default output path for a subreddit.
    pub fn default_output(subreddit: &str) -> PathBuf {
        PathBuf::from(format!("{subreddit}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            ScrapeParams::default_output("rust"),
            PathBuf::from("rust.json")
        );
    }
}
