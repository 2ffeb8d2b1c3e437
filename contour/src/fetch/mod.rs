//! Tile fetcher - concurrent download of a tile range.
//!
//! Issues one request per tile of a [`TileRange`](crate::coord::TileRange)
//! through a [`TileSource`](crate::provider::TileSource) using Tokio's
//! `JoinSet`, decodes each response to RGBA, and applies an
//! at-least-partial-success policy: failed tiles become gaps, and only a
//! batch with zero successful tiles is an error.

mod results;
mod stage;

pub use results::{TileFailure, TileFailureReason, TileResults};
pub use stage::fetch_tiles;

use thiserror::Error;

/// Errors that abort a whole fetch batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Every tile in the range failed
    #[error(
        "no elevation tiles could be loaded ({requested} requested); \
         try an alternative heightmap source instead"
    )]
    NoDataAvailable { requested: usize },

    /// The batch was superseded or cancelled by the caller
    #[error("tile fetch cancelled")]
    Cancelled,
}
