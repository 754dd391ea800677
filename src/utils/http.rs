// src/utils/http.rs

//! HTTP fetch capability.
//!
//! The crawler talks to the network through the [`Fetch`] trait so tests can
//! substitute fixture pages for real requests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, FROM, USER_AGENT};

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Capability to fetch the raw body of an absolute URL.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a URL and return its raw textual body.
    ///
    /// Transport errors propagate unchanged; no retry is attempted.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Production fetcher backed by a configured `reqwest` client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher sending the identity headers on every request.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| crate::error::AppError::config(e.to_string()))?,
        );
        headers.insert(
            FROM,
            HeaderValue::from_str(&config.from_contact)
                .map_err(|e| crate::error::AppError::config(e.to_string()))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let text = self.client.get(url).send().await?.text().await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CrawlerConfig;

    #[test]
    fn test_build_fetcher_with_defaults() {
        assert!(HttpFetcher::new(&CrawlerConfig::default()).is_ok());
    }

    #[test]
    fn test_build_fetcher_rejects_bad_header() {
        let config = CrawlerConfig {
            user_agent: "line\nbreak".to_string(),
            ..CrawlerConfig::default()
        };
        assert!(HttpFetcher::new(&config).is_err());
    }
}
