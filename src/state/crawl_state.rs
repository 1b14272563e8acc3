use crate::image::Image;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};

/// Page URL -> images found on that page
pub type ImageIndex = HashMap<String, HashSet<Image>>;

/// Page URL -> in-domain links found on that page
pub type Sitemap = HashMap<String, HashSet<String>>;

/// Shared, concurrently writable state of one crawl run
///
/// Entries are only ever added. Each map offers atomic single-key insertion,
/// which is all the crawl needs: a key, once written, is never revised.
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: DashMap<String, bool>,
    sitemap: DashMap<String, HashSet<String>>,
    images: DashMap<String, HashSet<Image>>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as scheduled for crawling
    ///
    /// Returns true only for the single caller that inserted the key. The
    /// check and the insert happen under the same shard lock, so two tasks
    /// racing on one URL can never both see it as new.
    pub fn mark_visited(&self, url: &str) -> bool {
        match self.visited.entry(url.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(true);
                true
            }
        }
    }

    /// Records the sitemap entry of a page
    ///
    /// Returns false (and keeps the existing entry) if the page already has one.
    pub fn record_links(&self, page: &str, links: HashSet<String>) -> bool {
        match self.sitemap.entry(page.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!("Sitemap entry for {} already recorded", page);
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(links);
                true
            }
        }
    }

    /// Records the image set of a page
    ///
    /// Returns false (and keeps the existing entry) if the page already has one.
    pub fn record_images(&self, page: &str, images: HashSet<Image>) -> bool {
        match self.images.entry(page.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!("Images for {} already recorded", page);
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(images);
                true
            }
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of pages whose images have been collected
    pub fn image_page_count(&self) -> usize {
        self.images.len()
    }

    /// Copies the Image Index out of the concurrent map
    pub fn image_index(&self) -> ImageIndex {
        self.images
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Copies the Sitemap out of the concurrent map
    pub fn sitemap(&self) -> Sitemap {
        self.sitemap
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
