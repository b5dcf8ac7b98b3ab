//! Webmirror: a polite site mirroring crawler
//!
//! This crate implements a concurrent, depth-bounded, same-origin web crawler
//! that mirrors a site to local storage, respecting robots.txt exclusion rules
//! and crawl-delay pacing.

pub mod config;
pub mod crawler;
pub mod robots;
pub mod storage;

use thiserror::Error;

/// Main error type for webmirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for webmirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::Crawler;
pub use robots::RobotsRuleSet;
