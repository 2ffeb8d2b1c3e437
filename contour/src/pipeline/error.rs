//! Error types for the terrain pipeline.

use crate::coord::BoundsError;
use crate::fetch::FetchError;
use crate::heightmap::HeightmapError;
use crate::mesh::MeshError;
use crate::mosaic::MosaicError;
use thiserror::Error;

/// Errors returned by [`TerrainPipeline`](super::TerrainPipeline).
///
/// Individual tile failures are not errors; they become gaps in the mosaic.
/// Only a request that cannot produce a heightmap at all fails.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// No area was selected
    #[error("no area selected: bounds are required to load a DEM")]
    MissingBounds,

    /// Bounds failed validation
    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    /// Zoom is outside what the tile source serves
    #[error("zoom level {zoom} is not supported by {source_name} (supported: {min}-{max})")]
    UnsupportedZoom {
        zoom: u8,
        source_name: String,
        min: u8,
        max: u8,
    },

    /// Bounds cover more tiles than a single request may fetch
    #[error("area needs {count} tiles at this zoom (limit {max}); select a smaller area or lower zoom")]
    TooManyTiles { count: usize, max: usize },

    /// Output resolution of zero
    #[error("output resolution must be at least 1 pixel")]
    InvalidResolution,

    /// Every tile failed
    #[error(
        "no elevation tiles could be loaded ({requested} requested); \
         try an alternative heightmap source instead"
    )]
    NoDataAvailable { requested: usize },

    /// Request was cancelled or superseded
    #[error("request cancelled")]
    Cancelled,

    /// Tile range cannot be assembled into one raster
    #[error(transparent)]
    Mosaic(#[from] MosaicError),

    /// Mesh displacement failed
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Heightmap image could not be read or written
    #[error(transparent)]
    Heightmap(#[from] HeightmapError),

    /// Internal error (e.g., blocking task panicked)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<FetchError> for TerrainError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NoDataAvailable { requested } => TerrainError::NoDataAvailable { requested },
            FetchError::Cancelled => TerrainError::Cancelled,
        }
    }
}

impl TerrainError {
    /// True for errors caused by cancellation rather than failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TerrainError::Cancelled)
    }
}
