//! Terrain pipeline orchestration.
//!
//! A request flows through these stages:
//!
//! ```text
//! GeoBounds ─► TileRange ─► fetch_tiles ─► compose_mosaic ─► decode
//!                                                                │
//!        MeshGrid ◄── displace ◄── Heightmap ◄── crop/resample ◄── normalize
//! ```
//!
//! Fetching is async and cancellable. The raster stages are pure functions run
//! through a [`BlockingExecutor`]. Mesh building is synchronous and can be
//! repeated with a new exaggeration without refetching.

mod error;
mod executor;
mod gate;
mod request;
mod summary;
mod terrain;

pub use error::TerrainError;
pub use executor::{BlockingExecutor, BlockingResult, ExecutorError, SyncExecutor, TokioExecutor};
pub use gate::RequestGate;
pub use request::TerrainRequest;
pub use summary::{DemHeightmap, DemSummary};
pub use terrain::TerrainPipeline;
