//! Output module for crawl reports and artifacts
//!
//! This module handles:
//! - The in-memory crawl report returned to callers
//! - Run statistics
//! - Writing `images.json`, `sitemap.json` and `stats.json`
//! - Printing a report to the console

mod console;
mod json;
pub mod stats;
mod traits;

pub use console::ConsoleOutputHandler;
pub use json::{JsonOutputHandler, IMAGES_FILE, SITEMAP_FILE, STATS_FILE};
pub use stats::{print_statistics, Statistic};
pub use traits::{CrawlReport, OutputError, OutputHandler, OutputResult};
