//! Image Finder main entry point
//!
//! This is the command-line interface for the Image Finder crawler.

use anyhow::Context;
use clap::Parser;
use image_finder::config::{load_config, Config};
use image_finder::output::{ConsoleOutputHandler, OutputHandler};
use image_finder::{Crawler, FinderError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Image Finder: crawls one site and catalogs its images
///
/// Starting from the seed URL, every link that stays under the seed is
/// followed once. The images of each page, a sitemap and run statistics are
/// written as JSON files to the output directory.
#[derive(Parser, Debug)]
#[command(name = "image-finder")]
#[command(version)]
#[command(about = "A concurrent same-domain image crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from; also the crawl boundary
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory for images.json, sitemap.json and stats.json
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Do not write JSON artifacts
    #[arg(long)]
    no_artifacts: bool,

    /// List every page and its images after the statistics
    #[arg(long)]
    list_images: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let crawler = Crawler::new(&config).context("Failed to create crawler")?;
    match crawler.crawl(&cli.seed).await {
        Ok(report) => {
            ConsoleOutputHandler::new(cli.list_images).write_report(&report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(FinderError::InvalidSeed { message, .. }) => {
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Loads the config file if one was given and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if cli.no_artifacts {
        config.output.write_artifacts = false;
    }

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("image_finder=info,warn"),
            1 => EnvFilter::new("image_finder=debug,info"),
            2 => EnvFilter::new("image_finder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
