//! Console report output

use crate::output::stats::print_statistics;
use crate::output::traits::{CrawlReport, OutputHandler, OutputResult};

/// Prints the report to stdout
///
/// With `list_images` set, every page and its images are listed after the
/// statistics.
pub struct ConsoleOutputHandler {
    list_images: bool,
}

impl ConsoleOutputHandler {
    pub fn new(list_images: bool) -> Self {
        Self { list_images }
    }
}

impl OutputHandler for ConsoleOutputHandler {
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()> {
        println!("Seed: {}\n", report.seed);
        print_statistics(&report.statistic);

        if self.list_images {
            println!();
            for (page, images) in report.sorted_images() {
                println!("URL '{}':", page);
                for image in images {
                    let mut tags = Vec::new();
                    if image.is_logo {
                        tags.push("logo");
                    }
                    if image.is_favicon {
                        tags.push("favicon");
                    }
                    let tags = if tags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", tags.join(", "))
                    };
                    println!("    {} ({}){}", image.url, image.name, tags);
                }
            }
        }

        println!("\n{} distinct images found", report.unique_images().len());
        Ok(())
    }
}
