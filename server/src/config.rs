//! Process configuration, read once at startup.

use clap::Parser;
use job_scraper::ScraperConfig;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "job-board", about = "Web form for searching job boards", version)]
pub struct Config {
    /// Listen address (host:port).
    #[arg(long, env = "JOBBOARD_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    /// Indeed country used when the form leaves it blank.
    #[arg(long, env = "JOBBOARD_COUNTRY", default_value = common::DEFAULT_COUNTRY)]
    pub country: String,

    /// Timeout for each outbound HTTP request, in seconds.
    #[arg(long, env = "JOBBOARD_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Pause between result pages of one board, in milliseconds.
    #[arg(long, env = "JOBBOARD_PAGE_DELAY_MS", default_value_t = 2000)]
    pub page_delay_ms: u64,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            timeout: Duration::from_secs(self.http_timeout_secs),
            page_delay: Duration::from_millis(self.page_delay_ms),
            ..ScraperConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["job-board"]).unwrap();
        assert_eq!(config.country, "India");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.scraper_config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "job-board",
            "--addr",
            "0.0.0.0:8080",
            "--country",
            "UK",
            "--page-delay-ms",
            "0",
        ])
        .unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.country, "UK");
        assert_eq!(config.scraper_config().page_delay, Duration::ZERO);
    }
}
