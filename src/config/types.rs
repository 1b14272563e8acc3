use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Image Finder
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
}

/// Worker pool and quiescence detection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of concurrent workers draining the task queue
    pub workers: usize,

    /// How often the orchestrator checks for quiescence (milliseconds)
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,

    /// Time without any task completion after which an empty queue is treated as done (milliseconds)
    #[serde(rename = "max-idle-ms")]
    pub max_idle_ms: u64,

    /// How long shutdown waits for in-flight tasks (milliseconds)
    #[serde(rename = "drain-timeout-ms")]
    pub drain_timeout_ms: u64,
}

impl CrawlerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn max_idle(&self) -> Duration {
        Duration::from_millis(self.max_idle_ms)
    }

    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            poll_interval_ms: 1_000,
            max_idle_ms: 10_000,
            drain_timeout_ms: 10_000,
        }
    }
}

/// HTTP fetcher settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Per-request timeout (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            user_agent: "Mozilla/5.0 (compatible; image-finder/0.1)".to_string(),
        }
    }
}

/// Artifact output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives images.json, sitemap.json and stats.json
    pub directory: PathBuf,

    /// Whether JSON artifacts are written at all
    #[serde(rename = "write-artifacts")]
    pub write_artifacts: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            write_artifacts: true,
        }
    }
}
