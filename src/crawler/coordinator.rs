//! Crawler coordinator - main crawl orchestration logic
//!
//! This module ties a crawl run together:
//! - Validating the seed URL
//! - Creating the run's state and worker pool
//! - Seeding the first task
//! - Detecting quiescence and shutting the pool down
//! - Assembling the report and writing artifacts

use crate::config::{validate, Config, CrawlerConfig, OutputConfig};
use crate::crawler::pool::WorkerPool;
use crate::crawler::task::{CrawlContext, CrawlTask};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::output::{CrawlReport, JsonOutputHandler, OutputHandler, Statistic};
use crate::state::CrawlState;
use crate::url::trim_url;
use crate::FinderError;
use std::sync::Arc;
use std::time::Instant;

/// How a crawl run's pool came to a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quiescence {
    /// Every submitted task finished
    Completed,
    /// Queue empty and no task completed for the configured idle time
    IdleTimeout,
}

/// Main crawler coordinator structure
///
/// A `Crawler` holds configuration and the page fetcher only; all crawl
/// state is created per call to [`Crawler::crawl`], so one crawler can run
/// several crawls, even concurrently.
pub struct Crawler {
    crawler: CrawlerConfig,
    output: OutputConfig,
    fetcher: Arc<dyn PageFetcher>,
}

impl Crawler {
    /// Creates a crawler that fetches pages over HTTP
    ///
    /// The configuration is validated first; an invalid one is reported as
    /// `FinderError::Config`.
    pub fn new(config: &Config) -> Result<Self, FinderError> {
        validate(config)?;
        let fetcher = HttpFetcher::new(&config.fetcher)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Creates a crawler around any page fetcher
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            crawler: config.crawler.clone(),
            output: config.output.clone(),
            fetcher,
        }
    }

    /// Crawls every in-domain page reachable from `seed`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The Image Index, Sitemap and statistics of the run
    /// * `Err(FinderError::InvalidSeed)` - The seed was empty, malformed or unreachable
    ///
    /// Failures after the seed check (page fetches, artifact writes, a slow
    /// drain) are logged and never turn into an error.
    pub async fn crawl(&self, seed: &str) -> Result<CrawlReport, FinderError> {
        let check = self.fetcher.check_url(seed).await;
        tracing::info!("{}", check.message);
        if !check.valid {
            return Err(FinderError::InvalidSeed {
                url: seed.to_string(),
                message: check.message,
            });
        }

        let state = Arc::new(CrawlState::new());
        let pool = WorkerPool::new(self.crawler.workers);
        let context = Arc::new(CrawlContext {
            domain: seed.to_string(),
            state: Arc::clone(&state),
            fetcher: Arc::clone(&self.fetcher),
            pool: pool.clone(),
        });

        let start_time = Instant::now();
        let seed_key = trim_url(seed);
        let seed_key = if seed_key.is_empty() {
            seed.to_string()
        } else {
            seed_key
        };

        tracing::info!(
            "Starting crawl of {} with {} workers",
            seed,
            self.crawler.workers
        );
        state.mark_visited(&seed_key);
        CrawlTask::new(seed_key, context).submit();

        let reason = self.wait_for_quiescence(&pool).await;
        tracing::debug!("Crawl quiescent: {:?}", reason);

        pool.shutdown();
        let drained = pool.await_drain(self.crawler.drain_timeout()).await;
        if drained {
            tracing::info!("Worker pool drained");
        } else {
            tracing::warn!(
                "Worker pool did not drain within {:?}; reporting partial results",
                self.crawler.drain_timeout()
            );
        }

        let statistic = Statistic::new(
            state.image_page_count(),
            state.visited_count(),
            start_time.elapsed(),
        );
        let report = CrawlReport {
            seed: seed.to_string(),
            images: state.image_index(),
            sitemap: state.sitemap(),
            statistic,
        };

        tracing::info!("Visited links: {}", report.statistic.num_visited_links);
        tracing::info!("Images extracted: {}", report.statistic.num_images_extracted);
        tracing::info!("Total Time (seconds): {}", report.statistic.total_seconds);
        tracing::info!(
            "Average Crawling Speed (pages/second): {}",
            report.statistic.pages_per_second
        );

        if drained && self.output.write_artifacts {
            let handler = JsonOutputHandler::new(&self.output.directory);
            if let Err(e) = handler.write_report(&report) {
                tracing::error!("Failed to write crawl artifacts: {}", e);
            }
        }

        Ok(report)
    }

    /// Polls the pool until no more work can appear
    ///
    /// The exact signal is the in-flight count reaching zero. The idle-time
    /// check (empty queue and no completion for `max_idle`) is kept as a
    /// fallback for tasks that never finish.
    async fn wait_for_quiescence(&self, pool: &WorkerPool) -> Quiescence {
        let poll_interval = self.crawler.poll_interval();
        let max_idle = self.crawler.max_idle();

        loop {
            tokio::time::sleep(poll_interval).await;

            if pool.in_flight() == 0 {
                return Quiescence::Completed;
            }

            if pool.pending_count() == 0 && pool.idle_for() >= max_idle {
                tracing::warn!(
                    "No task completed for {:?} with {} still running; stopping",
                    pool.idle_for(),
                    pool.in_flight()
                );
                return Quiescence::IdleTimeout;
            }

            tracing::trace!(
                "{} tasks in flight, {} pending",
                pool.in_flight(),
                pool.pending_count()
            );
        }
    }
}

/// Runs a complete crawl with HTTP fetching
///
/// This is the main entry point for the binary.
///
/// # Example
///
/// ```no_run
/// use image_finder::config::Config;
/// use image_finder::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default(), "https://example.com/").await?;
/// println!("{} pages visited", report.statistic.num_visited_links);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, seed: &str) -> Result<CrawlReport, FinderError> {
    let crawler = Crawler::new(&config)?;
    crawler.crawl(seed).await
}
