//! State module for tracking crawl progress
//!
//! One [`CrawlState`] exists per crawl run and is shared by reference with
//! every task of that run.
//!
//! # Components
//!
//! - Visited Set: URL -> "a crawl has been scheduled" flag
//! - Sitemap: page URL -> in-domain outbound links found on it
//! - Image Index: page URL -> images found on it

mod crawl_state;

pub use crawl_state::{CrawlState, ImageIndex, Sitemap};
