//! Contour - terrain meshes from Terrarium elevation tiles
//!
//! This library turns a geographic bounding box into a normalized grayscale
//! heightmap and a displaced 3D grid mesh:
//!
//! 1. [`coord`] maps the bounds to the Web Mercator tiles covering them
//! 2. [`fetch`] downloads those tiles concurrently through a [`provider`]
//! 3. [`mosaic`] places them onto one raster, leaving gaps for failed tiles
//! 4. [`elevation`] decodes Terrarium pixels to meters and [`normalize`]
//!    maps them onto 0-255 over the whole mosaic
//! 5. [`crop`] cuts the bounds out of the grayscale mosaic and resamples it
//! 6. [`mesh`] displaces a subdivided plane by the resulting [`heightmap`]
//!
//! # High-Level API
//!
//! The [`pipeline`] module runs all stages for one request:
//!
//! ```ignore
//! use contour::coord::GeoBounds;
//! use contour::pipeline::{TerrainPipeline, TerrainRequest};
//! use contour::provider::{AsyncReqwestClient, TerrariumSource};
//!
//! let source = TerrariumSource::new(AsyncReqwestClient::new()?);
//! let pipeline = TerrainPipeline::new(Arc::new(source));
//!
//! let request = TerrainRequest::new().with_bounds(GeoBounds::new(45.1, 45.0, 7.1, 7.0)?);
//! let dem = pipeline.fetch_heightmap(&request, CancellationToken::new()).await?;
//! println!("{}", dem.summary);
//!
//! let mesh = pipeline.build_mesh(&request, Some(&dem.heightmap))?;
//! ```

pub mod config;
pub mod coord;
pub mod crop;
pub mod elevation;
pub mod fetch;
pub mod heightmap;
pub mod logging;
pub mod mesh;
pub mod mosaic;
pub mod normalize;
pub mod pipeline;
pub mod provider;

/// Version of the Contour library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
