//! Feed engine configuration.

use std::time::Duration;

/// Environment variable names read by [`FeedConfig::from_env`].
pub const ENV_TOGGLE_LATENCY_MS: &str = "FEED_TOGGLE_LATENCY_MS";
pub const ENV_MOCK_LATENCY_MS: &str = "FEED_MOCK_LATENCY_MS";
pub const ENV_MOCK_TOTAL_POSTS: &str = "FEED_MOCK_TOTAL_POSTS";
pub const ENV_MOCK_SEED: &str = "FEED_MOCK_SEED";
pub const ENV_API_URL: &str = "FEED_API_URL";

/// Configuration for the feed store and its data sources.
///
/// Use the builder pattern to customize behavior.
///
/// # Example
///
/// ```ignore
/// use feedline::config::FeedConfig;
/// use std::time::Duration;
///
/// let config = FeedConfig::default()
///     .with_toggle_latency(Duration::ZERO)
///     .with_mock_total_posts(25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Simulated round trip before a like/retweet result resolves
    pub toggle_latency: Duration,
    /// Simulated network delay per mock page fetch
    pub mock_latency: Duration,
    /// Number of posts the mock source serves before running dry
    pub mock_total_posts: usize,
    /// Seed for deterministic mock data (random when unset)
    pub mock_seed: Option<u64>,
    /// Base URL of a real feed backend; the mock source is used when unset
    pub api_url: Option<String>,
    /// Per-request timeout for the HTTP source
    pub request_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            toggle_latency: Duration::from_millis(300),
            mock_latency: Duration::from_millis(500),
            mock_total_posts: 95,
            mock_seed: None,
            api_url: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl FeedConfig {
    /// Create a new FeedConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toggle_latency(mut self, latency: Duration) -> Self {
        self.toggle_latency = latency;
        self
    }

    pub fn with_mock_latency(mut self, latency: Duration) -> Self {
        self.mock_latency = latency;
        self
    }

    pub fn with_mock_total_posts(mut self, total: usize) -> Self {
        self.mock_total_posts = total;
        self
    }

    pub fn with_mock_seed(mut self, seed: u64) -> Self {
        self.mock_seed = Some(seed);
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Defaults overridden by any `FEED_*` environment variables that parse.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = parse_env::<u64>(ENV_TOGGLE_LATENCY_MS) {
            config.toggle_latency = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_env::<u64>(ENV_MOCK_LATENCY_MS) {
            config.mock_latency = Duration::from_millis(ms);
        }
        if let Some(total) = parse_env::<usize>(ENV_MOCK_TOTAL_POSTS) {
            config.mock_total_posts = total;
        }
        if let Some(seed) = parse_env::<u64>(ENV_MOCK_SEED) {
            config.mock_seed = Some(seed);
        }
        if let Ok(url) = std::env::var(ENV_API_URL) {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.api_url = Some(url.to_string());
            }
        }

        config
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparsable environment value");
            None
        }
    }
}
