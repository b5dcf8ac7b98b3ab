//! Crawler module for web page fetching and mirroring
//!
//! This module contains the core crawling logic, including:
//! - HTTP client construction and page fetching
//! - Global request pacing (crawl-delay)
//! - HTML link extraction
//! - Overall crawl coordination and termination

mod coordinator;
mod fetcher;
mod limiter;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use limiter::RateLimiter;
pub use parser::{extract_links, same_origin};

use crate::config::CrawlConfig;
use crate::Result;

/// Runs a complete mirror crawl from a seed URL
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and parse the seed URL
/// 2. Load robots.txt for the seed origin (when enabled)
/// 3. Fetch pages breadth-first up to the configured depth
/// 4. Write every fetched page to the output directory
///
/// # Arguments
///
/// * `config` - The crawl configuration
/// * `seed` - The URL to start from
///
/// # Returns
///
/// * `Ok(())` - Crawl ran to completion (possibly with per-page failures)
/// * `Err(MirrorError)` - Crawl could not start
pub async fn run_crawl(config: CrawlConfig, seed: &str) -> Result<()> {
    let crawler = Crawler::new(config, seed).await?;
    crawler.run().await
}
