//! Service layer for the scraper application.
//!
//! This module contains the business logic for:
//! - Post scraping (`PostScraper`)
//! - The extraction rule table (`selectors`)

mod posts;
pub mod selectors;

pub use posts::{PostScraper, ScrapeOutcome};
