// src/models/mod.rs

//! Domain models for the scraper application.

mod config;
mod params;
mod post;

// Re-export all public types
pub use config::{Config, CrawlerConfig};
pub use params::ScrapeParams;
pub use post::Post;
