//! Elevation tile source abstraction
//!
//! This module provides the [`TileSource`] trait consumed by the tile fetcher
//! and the production [`TerrariumSource`], which downloads Terrarium-encoded
//! PNG tiles over HTTPS through an [`AsyncHttpClient`].
//!
//! ```ignore
//! use contour::provider::{AsyncReqwestClient, TerrariumSource};
//!
//! let http_client = AsyncReqwestClient::new()?;
//! let source = TerrariumSource::new(http_client);
//! ```

mod http;
mod terrarium;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use terrarium::{TerrariumSource, DEFAULT_TERRARIUM_URL, TERRARIUM_MAX_ZOOM};
pub use types::{ProviderError, TileSource};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
