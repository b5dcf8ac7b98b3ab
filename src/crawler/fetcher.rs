//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler: building the shared
//! client with the configured user agent and timeout, and issuing GET requests
//! with the whole response body buffered in memory.

use crate::{MirrorError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a successful fetch
///
/// Ephemeral: consumed immediately to persist the body and extract links.
#[derive(Debug)]
pub struct FetchResult {
    /// HTTP status code
    pub status: u16,

    /// Content-Type header value (empty when absent)
    pub content_type: String,

    /// Full response body
    pub body: Vec<u8>,
}

impl FetchResult {
    /// Returns whether the response claims to be an HTML document
    pub fn is_html(&self) -> bool {
        self.content_type.contains("text/html")
    }
}

/// Builds the HTTP client used for every request in a crawl
///
/// # Arguments
///
/// * `user_agent` - Value for the User-Agent header
/// * `timeout` - Per-request timeout
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a URL, buffering the entire body
///
/// Any non-success status is surfaced as an error; there are no retries.
/// The body is fully read into memory, which assumes bounded page sizes.
///
/// # Returns
///
/// * `Ok(FetchResult)` - Status, content type, and body
/// * `Err(MirrorError)` - Transport failure, timeout, or non-success status
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchResult> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| MirrorError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MirrorError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    let body = response
        .bytes()
        .await
        .map_err(|source| MirrorError::Http {
            url: url.to_string(),
            source,
        })?
        .to_vec();

    Ok(FetchResult {
        status: status.as_u16(),
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("TestBot/1.0", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_is_html_detection() {
        let html = FetchResult {
            status: 200,
            content_type: "text/html; charset=utf-8".to_string(),
            body: Vec::new(),
        };
        assert!(html.is_html());

        let json = FetchResult {
            status: 200,
            content_type: "application/json".to_string(),
            body: Vec::new(),
        };
        assert!(!json.is_html());

        let missing = FetchResult {
            status: 200,
            content_type: String::new(),
            body: Vec::new(),
        };
        assert!(!missing.is_html());
    }

    // Network behavior (statuses, timeouts) is covered by the wiremock
    // integration tests in tests/crawl_tests.rs.
}
