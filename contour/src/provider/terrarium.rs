//! Terrarium elevation tile source.
//!
//! Fetches 256×256 PNG tiles whose RGB channels pack elevation as
//! `R·256 + G + B/256 − 32768` meters.
//!
//! # URL Pattern
//!
//! `https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png`
//!
//! The template is configurable; `{z}`, `{x}` and `{y}` are substituted with
//! the standard XYZ tile coordinates (x west→east, y north→south).

use crate::coord::TileCoord;
use crate::provider::{AsyncHttpClient, ProviderError, TileSource};

/// Public AWS Terrarium tiles endpoint (no API key required)
pub const DEFAULT_TERRARIUM_URL: &str =
    "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png";

/// Highest zoom level published by the Terrarium tile set.
pub const TERRARIUM_MAX_ZOOM: u8 = 15;

/// Terrarium tile source backed by an async HTTP client.
///
/// # Example
///
/// ```ignore
/// use contour::provider::{AsyncReqwestClient, TerrariumSource};
///
/// let client = AsyncReqwestClient::new()?;
/// let source = TerrariumSource::new(client);
/// ```
pub struct TerrariumSource<C: AsyncHttpClient> {
    http_client: C,
    url_template: String,
}

impl<C: AsyncHttpClient> TerrariumSource<C> {
    /// Creates a source using the public AWS endpoint.
    pub fn new(http_client: C) -> Self {
        Self::with_url_template(http_client, DEFAULT_TERRARIUM_URL)
    }

    /// Creates a source using a custom `{z}/{x}/{y}` URL template.
    pub fn with_url_template(http_client: C, url_template: impl Into<String>) -> Self {
        Self {
            http_client,
            url_template: url_template.into(),
        }
    }

    /// Returns the configured URL template.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    /// Builds the tile URL for the given coordinates.
    fn build_url(&self, tile: &TileCoord) -> String {
        self.url_template
            .replace("{z}", &tile.zoom.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }
}

impl<C: AsyncHttpClient + 'static> TileSource for TerrariumSource<C> {
    async fn fetch_tile(&self, tile: TileCoord) -> Result<Vec<u8>, ProviderError> {
        if !self.supports_zoom(tile.zoom) {
            return Err(ProviderError::UnsupportedZoom(tile.zoom));
        }
        let limit = tile.tiles_per_axis();
        if tile.x as u64 >= limit || tile.y as u64 >= limit {
            return Err(ProviderError::UnsupportedCoordinates {
                x: tile.x,
                y: tile.y,
                zoom: tile.zoom,
            });
        }

        let url = self.build_url(&tile);
        self.http_client.get(&url).await
    }

    fn name(&self) -> &str {
        "Terrarium"
    }

    fn min_zoom(&self) -> u8 {
        0
    }

    fn max_zoom(&self) -> u8 {
        TERRARIUM_MAX_ZOOM
    }
}
