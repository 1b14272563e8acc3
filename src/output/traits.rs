//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! report they consume.

use crate::image::Image;
use crate::output::stats::Statistic;
use crate::state::{ImageIndex, Sitemap};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything a finished crawl run produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed URL the run started from
    pub seed: String,

    /// Page URL -> images found on that page
    pub images: ImageIndex,

    /// Page URL -> in-domain links found on that page
    pub sitemap: Sitemap,

    pub statistic: Statistic,
}

impl CrawlReport {
    /// The Image Index with pages and images in sorted order
    pub fn sorted_images(&self) -> BTreeMap<&str, Vec<&Image>> {
        self.images
            .iter()
            .map(|(page, images)| {
                let mut images: Vec<&Image> = images.iter().collect();
                images.sort();
                (page.as_str(), images)
            })
            .collect()
    }

    /// The Sitemap with pages and links in sorted order
    pub fn sorted_sitemap(&self) -> BTreeMap<&str, Vec<&str>> {
        self.sitemap
            .iter()
            .map(|(page, links)| {
                let mut links: Vec<&str> = links.iter().map(String::as_str).collect();
                links.sort_unstable();
                (page.as_str(), links)
            })
            .collect()
    }

    /// Every distinct image across all pages
    pub fn unique_images(&self) -> Vec<&Image> {
        let mut all: Vec<&Image> = self.images.values().flatten().collect();
        all.sort();
        all.dedup();
        all
    }
}

/// Trait for output handlers
///
/// An output handler receives the final report of a crawl run.
pub trait OutputHandler {
    /// Emits the report
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()>;
}
