//! Crawler module: the concurrent crawl engine
//!
//! This module contains the core crawling logic, including:
//! - The worker pool that runs crawl tasks
//! - The crawl task that fetches a page and fans out to its links
//! - The coordinator that seeds a run and detects when it is done

mod coordinator;
mod pool;
mod task;

pub use coordinator::{run_crawl, Crawler, Quiescence};
pub use pool::WorkerPool;
pub use task::{filter_links, CrawlContext, CrawlTask};
