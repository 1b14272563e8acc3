//! JSON artifact output
//!
//! Writes the three files a crawl run leaves behind. Keys and arrays are
//! sorted so repeated runs over the same site produce identical files.

use crate::output::traits::{CrawlReport, OutputHandler, OutputResult};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const IMAGES_FILE: &str = "images.json";
pub const SITEMAP_FILE: &str = "sitemap.json";
pub const STATS_FILE: &str = "stats.json";

/// Output handler writing `images.json`, `sitemap.json` and `stats.json`
pub struct JsonOutputHandler {
    directory: PathBuf,
}

impl JsonOutputHandler {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    fn write_json<T: Serialize>(&self, filename: &str, value: &T) -> OutputResult<()> {
        let path = self.directory.join(filename);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!("Data has been written to '{}'", path.display());
        Ok(())
    }
}

impl OutputHandler for JsonOutputHandler {
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()> {
        std::fs::create_dir_all(&self.directory)?;

        self.write_json(IMAGES_FILE, &report.sorted_images())?;
        self.write_json(SITEMAP_FILE, &report.sorted_sitemap())?;
        self.write_json(STATS_FILE, &report.statistic)?;
        Ok(())
    }
}
