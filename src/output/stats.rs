//! Run statistics
//!
//! This module provides the summary record of a crawl run and its console
//! rendering.

use serde::Serialize;
use std::time::Duration;

/// Summary of one crawl run, serialized as `stats.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    /// Number of pages whose images were collected
    pub num_images_extracted: usize,

    /// Number of URLs in the Visited Set
    pub num_visited_links: usize,

    /// Whole seconds the run took
    pub total_seconds: u64,

    /// Average pages per second, rounded up to two decimals
    pub pages_per_second: String,
}

impl Statistic {
    pub fn new(pages_with_images: usize, visited: usize, elapsed: Duration) -> Self {
        let seconds = elapsed.as_secs_f64();
        let rate = if seconds > 0.0 {
            visited as f64 / seconds
        } else {
            0.0
        };

        Self {
            num_images_extracted: pages_with_images,
            num_visited_links: visited,
            total_seconds: elapsed.as_secs(),
            pages_per_second: format_rate(rate),
        }
    }
}

/// Formats a rate with two decimals, rounding up
///
/// Products within floating point noise of a whole number of hundredths are
/// not bumped to the next hundredth (1.1 stays "1.10").
pub fn format_rate(rate: f64) -> String {
    if !rate.is_finite() || rate <= 0.0 {
        return "0.00".to_string();
    }

    let hundredths = rate * 100.0;
    let nearest = hundredths.round();
    let rounded = if (hundredths - nearest).abs() < 1e-9 {
        nearest
    } else {
        hundredths.ceil()
    };

    format!("{:.2}", rounded / 100.0)
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &Statistic) {
    println!("=== Crawl Statistics ===\n");
    println!("  Visited links: {}", stats.num_visited_links);
    println!("  Pages with images collected: {}", stats.num_images_extracted);
    println!("  Total time (seconds): {}", stats.total_seconds);
    println!(
        "  Average crawling speed (pages/second): {}",
        stats.pages_per_second
    );
}
