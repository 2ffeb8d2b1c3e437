//! Per-tile fetch outcomes.

use crate::coord::{TileCoord, TileRange};
use crate::provider::ProviderError;
use image::RgbaImage;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Why a tile ended up absent from the mosaic.
#[derive(Debug, Clone, PartialEq)]
pub enum TileFailureReason {
    /// The source returned an error (network failure, 404, ...)
    Provider(ProviderError),
    /// The source did not answer within the per-tile timeout
    Timeout(Duration),
    /// The response could not be decoded as an image
    Decode(String),
    /// The fetch task panicked or could not run
    Task(String),
}

impl fmt::Display for TileFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileFailureReason::Provider(e) => write!(f, "{}", e),
            TileFailureReason::Timeout(d) => write!(f, "timed out after {:?}", d),
            TileFailureReason::Decode(msg) => write!(f, "image decode failed: {}", msg),
            TileFailureReason::Task(msg) => write!(f, "fetch task failed: {}", msg),
        }
    }
}

/// A tile that could not be fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct TileFailure {
    pub tile: TileCoord,
    pub reason: TileFailureReason,
}

/// Results of fetching every tile of a range.
///
/// Present tiles are keyed by coordinate; anything in the range that is not
/// present is an explicit gap.
#[derive(Debug)]
pub struct TileResults {
    range: TileRange,
    tiles: HashMap<TileCoord, RgbaImage>,
    failures: Vec<TileFailure>,
}

impl TileResults {
    /// Creates an empty result set for `range`.
    pub fn new(range: TileRange) -> Self {
        Self {
            range,
            tiles: HashMap::new(),
            failures: Vec::new(),
        }
    }

    /// Records a decoded tile.
    pub fn add_success(&mut self, tile: TileCoord, image: RgbaImage) {
        self.tiles.insert(tile, image);
    }

    /// Records a failed tile.
    pub fn add_failure(&mut self, tile: TileCoord, reason: TileFailureReason) {
        self.failures.push(TileFailure { tile, reason });
    }

    /// The range these results were fetched for.
    #[inline]
    pub fn range(&self) -> TileRange {
        self.range
    }

    /// Returns the decoded image for `tile`, or `None` if it is absent.
    pub fn get(&self, tile: &TileCoord) -> Option<&RgbaImage> {
        self.tiles.get(tile)
    }

    /// Iterates over present tiles.
    pub fn present(&self) -> impl Iterator<Item = (&TileCoord, &RgbaImage)> {
        self.tiles.iter()
    }

    /// Returns true if `tile` has an outcome, success or failure.
    pub fn is_recorded(&self, tile: &TileCoord) -> bool {
        self.tiles.contains_key(tile) || self.failures.iter().any(|f| f.tile == *tile)
    }

    /// Recorded failures, in completion order.
    pub fn failures(&self) -> &[TileFailure] {
        &self.failures
    }

    /// Returns the number of tiles fetched successfully.
    #[inline]
    pub fn success_count(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the number of failed tiles.
    #[inline]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Returns the number of tiles requested.
    #[inline]
    pub fn requested_count(&self) -> usize {
        self.range.tile_count()
    }

    /// Returns true if every requested tile is present.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.success_count() == self.requested_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_accounting() {
        let range = TileRange::new(0, 1, 0, 1, 1);
        let mut results = TileResults::new(range);

        results.add_success(TileCoord::new(0, 0, 1), RgbaImage::new(4, 4));
        results.add_failure(
            TileCoord::new(1, 0, 1),
            TileFailureReason::Timeout(Duration::from_secs(5)),
        );

        assert_eq!(results.success_count(), 1);
        assert_eq!(results.failure_count(), 1);
        assert_eq!(results.requested_count(), 4);
        assert!(!results.is_complete());
        assert!(results.get(&TileCoord::new(0, 0, 1)).is_some());
        assert!(results.get(&TileCoord::new(1, 0, 1)).is_none());
        assert!(results.is_recorded(&TileCoord::new(1, 0, 1)));
        assert!(!results.is_recorded(&TileCoord::new(1, 1, 1)));
    }

    #[test]
    fn test_failure_reason_display() {
        let reason = TileFailureReason::Provider(ProviderError::HttpError("HTTP 404".into()));
        assert_eq!(reason.to_string(), "HTTP error: HTTP 404");

        let reason = TileFailureReason::Timeout(Duration::from_secs(5));
        assert_eq!(reason.to_string(), "timed out after 5s");
    }
}
