//! Configuration for a single crawl
//!
//! The configuration is set once at startup (from the command line) and is
//! immutable for the lifetime of the crawl.

use crate::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Crawl behavior configuration
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Maximum recursion depth from the seed URL (0 = seed page only)
    pub max_depth: u32,

    /// Maximum number of concurrent page fetches
    pub max_concurrent: usize,

    /// Per-request timeout
    pub timeout: Duration,

    /// User-agent header value, also used for robots.txt rule matching
    pub user_agent: String,

    /// Root directory of the local mirror
    pub output_dir: PathBuf,

    /// Whether to honor robots.txt exclusion rules and crawl delays
    pub respect_robots: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_concurrent: 5,
            timeout: Duration::from_secs(30),
            user_agent: "webmirror/1.0".to_string(),
            output_dir: PathBuf::from("mirrored_site"),
            respect_robots: true,
        }
    }
}

impl CrawlConfig {
    /// Validates the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration is usable
    /// * `Err(ConfigError)` - A value that would stall or break the crawl
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent == 0 {
            return Err(ConfigError::Validation(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "timeout must be non-zero".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
