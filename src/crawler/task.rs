//! A single unit of crawl work
//!
//! A task fetches one page, records what it found, and schedules a new task
//! for every in-domain link nobody has scheduled yet. That scheduling is the
//! only way new work enters the pool.

use crate::crawler::pool::WorkerPool;
use crate::fetch::{PageFetcher, ParsedPage};
use crate::image::extract_images;
use crate::state::CrawlState;
use crate::url::{is_in_domain, is_valid_link_to_crawl, trim_url};
use futures::FutureExt;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Everything a task of one crawl run shares with its siblings
pub struct CrawlContext {
    /// The seed URL; a link is in-domain when it starts with this string
    pub domain: String,
    pub state: Arc<CrawlState>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub pool: WorkerPool,
}

/// Crawls one URL whose Visited Set entry is already set
pub struct CrawlTask {
    url: String,
    context: Arc<CrawlContext>,
}

impl CrawlTask {
    pub fn new(url: impl Into<String>, context: Arc<CrawlContext>) -> Self {
        Self {
            url: url.into(),
            context,
        }
    }

    /// Hands this task to the pool
    pub fn submit(self) -> bool {
        let pool = self.context.pool.clone();
        let url = self.url.clone();
        let accepted = pool.submit(self.run());
        if !accepted {
            tracing::debug!("Dropped crawl of {}: pool no longer accepts work", url);
        }
        accepted
    }

    /// Fetches the page, records its sitemap and image entries, then fans out
    ///
    /// A failed or panicking fetch is terminal for this URL: it is recorded
    /// with no links and no images, and nothing is scheduled from it.
    pub async fn run(self) {
        tracing::info!("Visiting {}", self.url);
        let context = &self.context;

        let fetched = AssertUnwindSafe(context.fetcher.fetch_page(&self.url))
            .catch_unwind()
            .await;
        let page = match fetched {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => {
                tracing::warn!("Failed to fetch {}: {}", self.url, e);
                ParsedPage::default()
            }
            Err(_) => {
                tracing::error!("Fetcher panicked on {}", self.url);
                ParsedPage::default()
            }
        };

        let links = filter_links(&page.links, &context.domain);
        let images = extract_images(&page.images);
        tracing::debug!(
            "{}: {} in-domain links, {} images",
            self.url,
            links.len(),
            images.len()
        );

        context.state.record_images(&self.url, images);
        context.state.record_links(&self.url, links.clone());

        for link in links {
            if context.state.mark_visited(&link) {
                CrawlTask::new(link, Arc::clone(&self.context)).submit();
            }
        }
    }
}

/// Keeps the crawlable, in-domain links of a page, canonicalized
pub fn filter_links(links: &[String], domain: &str) -> HashSet<String> {
    links
        .iter()
        .filter(|link| is_valid_link_to_crawl(link))
        .filter(|link| is_in_domain(link, domain))
        .map(|link| trim_url(link))
        .filter(|link| !link.is_empty())
        .collect()
}
