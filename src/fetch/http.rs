//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with the configured user agent and timeout
//! - Probing the seed URL before a crawl starts
//! - Fetching pages and classifying failures

use crate::config::FetcherConfig;
use crate::fetch::{parse_html, status_message, PageFetcher, ParsedPage, UrlCheck};
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy; the timeout covers
/// the whole request including the body.
///
/// # Example
///
/// ```no_run
/// use image_finder::config::FetcherConfig;
/// use image_finder::fetch::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by reqwest and scraper
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn classify_network_error(url: &str, e: &reqwest::Error) -> FetchError {
    let message = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else if e.is_redirect() {
        "Too many redirects".to_string()
    } else {
        e.to_string()
    };

    FetchError::Network {
        url: url.to_string(),
        message,
    }
}

/// Only HTML documents are parsed for links and images
fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn check_url(&self, url: &str) -> UrlCheck {
        if url.trim().is_empty() {
            return UrlCheck::invalid("URL is empty");
        }

        if let Err(e) = Url::parse(url) {
            return UrlCheck::invalid(format!("URL '{}' is malformed: {}", url, e));
        }

        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                UrlCheck {
                    valid: status.is_success(),
                    status: Some(status.as_u16()),
                    message: status_message(url, status.as_u16()),
                }
            }
            Err(e) => {
                tracing::error!("Failed to connect to URL '{}': {}", url, e);
                UrlCheck::invalid(classify_network_error(url, &e).to_string())
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> FetchResult<ParsedPage> {
        let request_url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|e| classify_network_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_html_content_type(&content_type) {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        // Relative links resolve against where we ended up, not where we started
        let final_url = response.url().clone();

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(parse_html(&body, &final_url))
    }
}
