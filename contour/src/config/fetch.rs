//! Tile fetch configuration.

use super::defaults::{DEFAULT_MAX_CONCURRENT, DEFAULT_TILE_TIMEOUT_SECS};
use super::settings::DownloadSettings;
use std::time::Duration;

/// Configuration for fetching a tile range.
///
/// # Example
///
/// ```
/// use contour::config::FetchConfig;
/// use std::time::Duration;
///
/// let config = FetchConfig::default();
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// assert_eq!(config.max_concurrent(), None);
///
/// let config = FetchConfig::new()
///     .with_timeout(Duration::from_secs(2))
///     .with_max_concurrent(4);
/// assert_eq!(config.max_concurrent(), Some(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    /// Time allowed for a single tile before it is treated as absent
    timeout: Duration,
    /// Cap on in-flight requests; `None` requests every tile at once
    max_concurrent: Option<usize>,
}

impl FetchConfig {
    /// Create a new fetch configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `[download]` section of the config file.
    pub fn from_settings(settings: &DownloadSettings) -> Self {
        Self::new()
            .with_timeout(Duration::from_secs(settings.timeout))
            .with_max_concurrent(settings.max_concurrent)
    }

    /// Set the per-tile timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of concurrent requests. `0` removes the cap.
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = (max > 0).then_some(max);
        self
    }

    /// Get the per-tile timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the concurrency cap, if any.
    pub fn max_concurrent(&self) -> Option<usize> {
        self.max_concurrent
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TILE_TIMEOUT_SECS),
            max_concurrent: (DEFAULT_MAX_CONCURRENT > 0).then_some(DEFAULT_MAX_CONCURRENT),
        }
    }
}
