//! Provider types and traits

use crate::coord::TileCoord;
use std::fmt;
use std::future::Future;

/// Errors that can occur while fetching a tile image.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed before a response arrived, or the body was lost
    HttpError(String),
    /// The server answered with a non-success status
    Status { status: u16, url: String },
    /// Zoom level not supported by this source
    UnsupportedZoom(u8),
    /// Tile index outside `[0, 2^zoom)`
    UnsupportedCoordinates { x: u32, y: u32, zoom: u8 },
    /// Invalid response data from the source
    InvalidResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::Status { status, url } => write!(f, "HTTP {} from {}", status, url),
            ProviderError::UnsupportedZoom(zoom) => {
                write!(f, "Zoom level {} not supported by provider", zoom)
            }
            ProviderError::UnsupportedCoordinates { x, y, zoom } => {
                write!(
                    f,
                    "Tile ({}, {}) at zoom {} not supported by provider",
                    x, y, zoom
                )
            }
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Async source of elevation tile images.
///
/// Implementors return the raw encoded bytes (typically PNG) of one
/// 256×256 Terrarium tile. Any service exposing the XYZ tile scheme with the
/// Terrarium encoding is interchangeable.
pub trait TileSource: Send + Sync + 'static {
    /// Fetches the encoded image for `tile`.
    fn fetch_tile(
        &self,
        tile: TileCoord,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;

    /// Returns the source's name for logging and identification.
    fn name(&self) -> &str;

    /// Returns the minimum supported zoom level.
    fn min_zoom(&self) -> u8;

    /// Returns the maximum supported zoom level.
    fn max_zoom(&self) -> u8;

    /// Checks if this source supports the given zoom level.
    fn supports_zoom(&self, zoom: u8) -> bool {
        zoom >= self.min_zoom() && zoom <= self.max_zoom()
    }
}
