//! Crawler configuration
//!
//! Bounds for one crawl run: how many link hops to follow outward from the
//! seed and how long to pause between article fetches. Defaults lean toward
//! polite crawling; use the builder to adjust either bound.

use std::time::Duration;

/// Configuration for a crawl run
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Maximum link depth to crawl; the seed is depth 0
    pub max_depth: u32,

    /// Pause between article fetches
    pub wait: Duration,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            wait: Duration::from_millis(500),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the maximum link depth
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the pause between article fetches
    pub fn wait(mut self, wait: Duration) -> Self {
        self.config.wait = wait;
        self
    }

    /// Set the pause between article fetches in fractional seconds
    pub fn wait_secs(mut self, secs: f64) -> Self {
        self.config.wait = Duration::from_secs_f64(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }
}
