use crate::config::types::{Config, CrawlerConfig, FetcherConfig, OutputConfig};
use crate::ConfigError;

const MAX_WORKERS: usize = 256;
const MIN_POLL_INTERVAL_MS: u64 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    validate_idle_threshold(&config.crawler, &config.fetcher)?;
    Ok(())
}

/// A page still within its fetch timeout must not look like a hung task
fn validate_idle_threshold(
    crawler: &CrawlerConfig,
    fetcher: &FetcherConfig,
) -> Result<(), ConfigError> {
    if crawler.max_idle_ms <= fetcher.timeout_ms {
        return Err(ConfigError::Validation(format!(
            "max-idle-ms ({}ms) must be greater than the fetcher timeout-ms ({}ms)",
            crawler.max_idle_ms, fetcher.timeout_ms
        )));
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.poll_interval_ms < MIN_POLL_INTERVAL_MS {
        return Err(ConfigError::Validation(format!(
            "poll-interval-ms must be >= {}ms, got {}ms",
            MIN_POLL_INTERVAL_MS, config.poll_interval_ms
        )));
    }

    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeout-ms must be greater than zero".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
