// src/pipeline/scrape.rs

//! Post scraping pipeline.

use chrono::Utc;

use crate::error::Result;
use crate::models::ScrapeParams;
use crate::services::{PostScraper, ScrapeOutcome};
use crate::storage::{self, PageCache};
use crate::utils::http::Fetch;

/// Run the scraper end to end: crawl, then write the output artifact.
///
/// The output file is written exactly once, after the full post list is
/// finalized; a run that fails midway leaves no artifact behind.
pub async fn run_scraper(params: &ScrapeParams, fetcher: &dyn Fetch) -> Result<ScrapeOutcome> {
    let start_time = Utc::now();

    log::info!(
        "Scraping r/{} (target: {} posts)",
        params.subreddit,
        params.target_count
    );

    let cache = PageCache::open(&params.cache_dir, &params.subreddit).await?;
    let scraper = PostScraper::new(params.clone(), fetcher, cache);
    let outcome = scraper.scrape().await?;

    storage::write_posts(&params.output, &outcome.posts).await?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Saved {} posts to {} ({} pages, {} cache hits, {} network fetches, {:.1}s)",
        outcome.posts.len(),
        params.output.display(),
        outcome.pages_visited,
        outcome.cache_hits,
        outcome.network_fetches,
        elapsed.num_milliseconds() as f64 / 1000.0
    );
    if outcome.non_text_skips > 0 {
        log::info!("Skipped {} non-text posts", outcome.non_text_skips);
    }
    if outcome.extract_skips > 0 {
        log::warn!(
            "Skipped {} posts with malformed detail pages",
            outcome.extract_skips
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::error::AppError;
    use crate::models::Post;

    struct FixtureFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl Fetch for FixtureFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::validation(format!("unexpected fetch: {url}")))
        }
    }

    fn fixture_site() -> FixtureFetcher {
        let listing = concat!(
            "<html><body>",
            r#"<div class="thing" data-permalink="/r/rust/comments/a/" data-kind="self" data-promoted="false"></div>"#,
            "</body></html>"
        );
        let detail = concat!(
            "<html><body>",
            r#"<div class="sitetable">"#,
            r#"<div class="thing" data-timestamp="1700000000" data-author="u" data-score="3" data-comments-count="1">"#,
            r#"<p class="title"><a class="title">Hello</a></p>"#,
            r#"<div class="usertext-body">World</div>"#,
            "</div></div></body></html>"
        );

        let mut pages = HashMap::new();
        pages.insert(
            "https://old.reddit.com/r/rust/".to_string(),
            listing.to_string(),
        );
        pages.insert(
            "https://old.reddit.com/r/rust/comments/a/".to_string(),
            detail.to_string(),
        );
        FixtureFetcher { pages }
    }

    #[tokio::test]
    async fn test_run_writes_output_file() {
        let tmp = TempDir::new().unwrap();
        let params = ScrapeParams {
            subreddit: "rust".to_string(),
            target_count: 1,
            cache_dir: tmp.path().join("cache"),
            politeness_secs: 0.0,
            output: tmp.path().join("rust.json"),
            refresh: false,
            ignore_stickied: true,
        };

        let outcome = run_scraper(&params, &fixture_site()).await.unwrap();
        assert_eq!(outcome.posts.len(), 1);

        let content = std::fs::read_to_string(&params.output).unwrap();
        let posts: Vec<Post> = serde_json::from_str(&content).unwrap();
        assert_eq!(posts[0].title, "Hello");
        assert_eq!(posts[0].text, "World");
    }

    #[tokio::test]
    async fn test_second_run_is_served_from_cache() {
        let tmp = TempDir::new().unwrap();
        let params = ScrapeParams {
            subreddit: "rust".to_string(),
            target_count: 1,
            cache_dir: tmp.path().join("cache"),
            politeness_secs: 0.0,
            output: tmp.path().join("rust.json"),
            refresh: false,
            ignore_stickied: true,
        };

        run_scraper(&params, &fixture_site()).await.unwrap();

        // A fetcher with no pages: the second run must not hit the network.
        let offline = FixtureFetcher {
            pages: HashMap::new(),
        };
        let outcome = run_scraper(&params, &offline).await.unwrap();
        assert_eq!(outcome.posts.len(), 1);
        assert_eq!(outcome.network_fetches, 0);
    }
}
