//! Pipeline entry points for scraper operations.
//!
//! - `run_scraper`: Crawl a subreddit and write the post list to disk

pub mod scrape;

pub use scrape::run_scraper;
