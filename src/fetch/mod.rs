//! Page fetching for the crawler
//!
//! The crawl engine only needs two things from a page: its outbound links and
//! its image candidates. [`PageFetcher`] is that seam; [`HttpFetcher`] is the
//! reqwest + scraper implementation used by the binary, and tests plug in
//! their own in-memory fetchers.

mod http;
mod parser;

pub use http::{build_http_client, HttpFetcher};
pub use parser::parse_html;

use crate::image::ImageCandidate;
use crate::FetchResult;
use async_trait::async_trait;

/// Links and image candidates extracted from one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Absolute outbound link URLs, in document order
    pub links: Vec<String>,

    /// Image-bearing elements, in document order
    pub images: Vec<ImageCandidate>,
}

/// Outcome of probing a seed URL before crawling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCheck {
    /// True when the URL answered with a success status
    pub valid: bool,

    /// Status code, when a response was received
    pub status: Option<u16>,

    /// Human readable summary, e.g. `URL at 'https://x/' returned OK`
    pub message: String,
}

impl UrlCheck {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            status: None,
            message: message.into(),
        }
    }
}

/// Source of parsed pages for the crawler
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Checks that a URL is reachable with a success status
    async fn check_url(&self, url: &str) -> UrlCheck;

    /// Fetches and parses a page
    async fn fetch_page(&self, url: &str) -> FetchResult<ParsedPage>;
}

/// Builds the status summary used for seed validation messages
pub(crate) fn status_message(url: &str, status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Status Not Defined");
    format!("URL at '{}' returned {}", url, reason)
}
