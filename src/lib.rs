//! Image Finder: a concurrent same-domain image crawler
//!
//! This crate crawls a website from a seed URL, follows every in-domain link it
//! discovers, and records the images found on each page along with a sitemap
//! and run statistics.

pub mod config;
pub mod crawler;
pub mod fetch;
pub mod image;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Image Finder operations
#[derive(Debug, Error)]
pub enum FinderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {message}")]
    InvalidSeed { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors reported by a page fetcher for a single URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Not an HTML page {url}: content type '{content_type}'")]
    ContentMismatch { url: String, content_type: String },
}

/// Result type alias for Image Finder operations
pub type Result<T> = std::result::Result<T, FinderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Crawler;
pub use image::Image;
pub use output::{CrawlReport, Statistic};
pub use url::{get_domain, is_in_domain, is_valid_link_to_crawl, trim_url};
