// src/services/posts.rs

//! Post scraper service.
//!
//! Walks a subreddit's listing chain one page at a time, follows each listed
//! post to its detail page through the on-disk cache, and extracts text
//! posts until the target count is reached or the listing runs out.

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Post, ScrapeParams};
use crate::services::selectors as sel;
use crate::storage::PageCache;
use crate::utils::http::Fetch;
use crate::utils::{base_url, permalink_target, relative_target, resolve_url, target_url};

/// Summary of a scrape run.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    /// Accepted text posts, in traversal order
    pub posts: Vec<Post>,
    /// Listing pages processed
    pub pages_visited: usize,
    /// Targets served from the cache
    pub cache_hits: usize,
    /// Targets fetched over the network
    pub network_fetches: usize,
    /// Items seen but dropped for having no body text
    pub non_text_skips: usize,
    /// Items dropped because a required detail attribute was missing
    pub extract_skips: usize,
    /// Politeness pauses taken
    pub pauses: usize,
}

/// One entry on a listing page, before filtering.
#[derive(Debug)]
struct ListedItem {
    /// Detail-page target, relative to the subreddit base
    target: String,
    kind: String,
    promoted: bool,
    stickied: bool,
}

/// Parsed view of a listing page: surviving items plus the next-page target.
#[derive(Debug)]
struct ListingPage {
    items: Vec<ListedItem>,
    next_target: Option<String>,
}

/// Service for scraping text posts from one subreddit.
pub struct PostScraper<'a> {
    params: ScrapeParams,
    fetcher: &'a dyn Fetch,
    cache: PageCache,
}

impl<'a> PostScraper<'a> {
    /// Create a new scraper over the given fetch capability and cache.
    pub fn new(params: ScrapeParams, fetcher: &'a dyn Fetch, cache: PageCache) -> Self {
        Self {
            params,
            fetcher,
            cache,
        }
    }

    /// Run the scrape loop to completion.
    ///
    /// Returns the accumulated posts (possibly fewer than the target count
    /// if the listing chain ran out) together with the run counters.
    pub async fn scrape(&self) -> Result<ScrapeOutcome> {
        let mut outcome = ScrapeOutcome::default();

        // Pending listing targets. Pop order is most-recently-pushed-first;
        // since each page contributes at most one next-page target this is
        // de facto sequential, but the stack order matters if multiple seed
        // targets are ever introduced.
        let mut queue: Vec<String> = vec!["/".to_string()];

        while let Some(target) = queue.pop() {
            if outcome.posts.len() >= self.params.target_count {
                break;
            }

            log::info!("Fetching listing page {}", target);
            let (listing_html, listing_cached) = self.fetch_target(&target, &mut outcome).await?;
            let page = self.parse_listing(&listing_html)?;
            outcome.pages_visited += 1;

            for item in &page.items {
                self.visit_item(item, &mut outcome).await?;

                if outcome.posts.len() >= self.params.target_count {
                    // Remaining items on this page are never visited.
                    break;
                }
            }

            match page.next_target {
                Some(next) => queue.push(next),
                None => log::info!("No more pages for r/{}", self.params.subreddit),
            }

            if !listing_cached {
                self.pause(&mut outcome).await;
            }
        }

        Ok(outcome)
    }

    /// Fetch a detail page and record its post, non-text skip, or
    /// extraction skip.
    async fn visit_item(&self, item: &ListedItem, outcome: &mut ScrapeOutcome) -> Result<()> {
        let (detail_html, detail_cached) = self.fetch_target(&item.target, outcome).await?;

        match self.extract_post(&detail_html) {
            Ok(Some(post)) => {
                outcome.posts.push(post);
                log::info!(
                    "Scraped {}/{}",
                    outcome.posts.len(),
                    self.params.target_count
                );
            }
            Ok(None) => {
                outcome.non_text_skips += 1;
                log::info!("Skipping non-text post {}", item.target);
            }
            // Malformed detail page: skip the item, keep crawling.
            Err(error) => {
                outcome.extract_skips += 1;
                log::warn!("Failed to extract {}: {}", item.target, error);
            }
        }

        if !detail_cached {
            self.pause(outcome).await;
        }
        Ok(())
    }

    /// Serve a target from the cache or fetch and store it.
    ///
    /// Returns the body and whether it came from the cache. Under refresh
    /// mode every lookup is treated as a miss and the entry is rewritten.
    async fn fetch_target(
        &self,
        target: &str,
        outcome: &mut ScrapeOutcome,
    ) -> Result<(String, bool)> {
        if !self.params.refresh
            && let Some(body) = self.cache.get(target).await?
        {
            log::debug!("Cache hit for {}", target);
            outcome.cache_hits += 1;
            return Ok((body, true));
        }

        let url = target_url(&self.params.subreddit, target);
        log::info!("Fetching {}", url);
        let body = self.fetcher.fetch(&url).await?;
        self.cache.put(target, &body).await?;
        outcome.network_fetches += 1;
        Ok((body, false))
    }

    /// Sleep the politeness interval after a real network fetch.
    async fn pause(&self, outcome: &mut ScrapeOutcome) {
        outcome.pauses += 1;
        tokio::time::sleep(Duration::from_secs_f64(self.params.politeness_secs)).await;
    }

    /// Parse a listing page into surviving items and the next-page target.
    fn parse_listing(&self, html: &str) -> Result<ListingPage> {
        let document = Html::parse_document(html);
        let thing_sel = Self::parse_selector(sel::LISTING_THING)?;
        let next_sel = Self::parse_selector(sel::NEXT_PAGE)?;

        let mut items = Vec::new();
        for thing in document.select(&thing_sel) {
            let Some(item) = self.parse_listed_item(&thing) else {
                continue;
            };
            if self.is_excluded(&item) {
                log::debug!("Filtered listing item {}", item.target);
                continue;
            }
            items.push(item);
        }

        let base = url::Url::parse(&base_url(&self.params.subreddit))?;
        let next_target = document
            .select(&next_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(&base, href))
            .and_then(|absolute| {
                let target = relative_target(&self.params.subreddit, &absolute);
                if target.is_none() {
                    log::warn!("Next-page link points outside the subreddit: {}", absolute);
                }
                target
            });

        Ok(ListingPage { items, next_target })
    }

    /// Read one listing entry's coarse attributes.
    fn parse_listed_item(&self, thing: &ElementRef<'_>) -> Option<ListedItem> {
        let element = thing.value();
        let Some(permalink) = element.attr(sel::ATTR_PERMALINK) else {
            log::warn!("Listing entry without a permalink, skipping");
            return None;
        };

        Some(ListedItem {
            target: permalink_target(&self.params.subreddit, permalink),
            kind: element.attr(sel::ATTR_KIND).unwrap_or("").to_string(),
            promoted: element.attr(sel::ATTR_PROMOTED) == Some("true"),
            stickied: element.classes().any(|c| c == sel::CLASS_STICKIED),
        })
    }

    /// Inclusion filter: video and promoted entries are always dropped,
    /// stickied entries only when the option is on.
    fn is_excluded(&self, item: &ListedItem) -> bool {
        item.kind == "video" || item.promoted || (self.params.ignore_stickied && item.stickied)
    }

    /// Extract a post from a detail page.
    ///
    /// `Ok(None)` means the post has no body text (image/link post) and is
    /// dropped; a missing or non-numeric required attribute is an error.
    fn extract_post(&self, html: &str) -> Result<Option<Post>> {
        let document = Html::parse_document(html);
        let sitetable_sel = Self::parse_selector(sel::SITETABLE)?;
        let thing_sel = Self::parse_selector(sel::DETAIL_THING)?;
        let title_sel = Self::parse_selector(sel::DETAIL_TITLE)?;
        let body_sel = Self::parse_selector(sel::DETAIL_BODY)?;

        // All required fields hang off the document's first content table.
        let sitetable = document
            .select(&sitetable_sel)
            .next()
            .ok_or_else(|| AppError::extract("detail page", "no content table"))?;
        let thing = sitetable
            .select(&thing_sel)
            .next()
            .ok_or_else(|| AppError::extract("detail page", "no post node in content table"))?;

        let timestamp = Self::required_int(&thing, sel::ATTR_TIMESTAMP)?;
        let author = Self::required_attr(&thing, sel::ATTR_AUTHOR)?.to_string();
        let score = Self::required_int(&thing, sel::ATTR_SCORE)?;
        let comments_count = Self::required_int(&thing, sel::ATTR_COMMENTS)?;

        let title = document
            .select(&title_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let text = sitetable
            .select(&body_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        if text.is_empty() {
            return Ok(None);
        }

        Ok(Some(Post {
            title,
            text,
            author,
            score,
            comments_count,
            timestamp,
        }))
    }

    fn required_attr<'b>(thing: &'b ElementRef<'_>, attr: &str) -> Result<&'b str> {
        thing
            .value()
            .attr(attr)
            .ok_or_else(|| AppError::extract("detail page", format!("missing {attr}")))
    }

    fn required_int(thing: &ElementRef<'_>, attr: &str) -> Result<i64> {
        let raw = Self::required_attr(thing, attr)?;
        raw.parse()
            .map_err(|_| AppError::extract("detail page", format!("non-numeric {attr}: '{raw}'")))
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}

/// Concatenated, whitespace-trimmed text content of an element.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
