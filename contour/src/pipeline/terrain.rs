//! Terrain pipeline: bounds → tiles → mosaic → heightmap → crop → mesh.

use super::{
    BlockingExecutor, DemHeightmap, DemSummary, TerrainError, TerrainRequest, TokioExecutor,
};
use crate::config::{FetchConfig, DEFAULT_MAX_TILES, TILE_SIZE};
use crate::coord::{GeoBounds, TileRange};
use crate::crop::{resample, CropRect, ResampleFilter};
use crate::elevation::decode_terrarium;
use crate::fetch::{fetch_tiles, TileResults};
use crate::heightmap::Heightmap;
use crate::mesh::{displace, MeshGrid};
use crate::mosaic::{compose_mosaic, MosaicError};
use crate::normalize::normalize;
use crate::provider::TileSource;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Drives a [`TerrainRequest`] through every stage.
///
/// Holds only configuration and the tile source; each call works on its own
/// request and returns owned results.
pub struct TerrainPipeline<S, E = TokioExecutor> {
    source: Arc<S>,
    executor: E,
    fetch_config: FetchConfig,
    max_tiles: usize,
}

impl<S: TileSource> TerrainPipeline<S, TokioExecutor> {
    /// Creates a pipeline running raster stages on Tokio's blocking pool.
    pub fn new(source: Arc<S>) -> Self {
        Self::with_executor(source, TokioExecutor::new())
    }
}

impl<S, E> TerrainPipeline<S, E>
where
    S: TileSource,
    E: BlockingExecutor,
{
    /// Creates a pipeline with a specific executor.
    pub fn with_executor(source: Arc<S>, executor: E) -> Self {
        Self {
            source,
            executor,
            fetch_config: FetchConfig::default(),
            max_tiles: DEFAULT_MAX_TILES,
        }
    }

    pub fn with_fetch_config(mut self, config: FetchConfig) -> Self {
        self.fetch_config = config;
        self
    }

    /// Sets the largest tile range a single request may fetch.
    pub fn with_max_tiles(mut self, max_tiles: usize) -> Self {
        self.max_tiles = max_tiles;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Validates `request` and resolves the tile range it needs. Makes no
    /// network calls.
    pub fn plan(&self, request: &TerrainRequest) -> Result<(GeoBounds, TileRange), TerrainError> {
        let bounds = request.bounds.ok_or(TerrainError::MissingBounds)?;

        if !self.source.supports_zoom(request.zoom) {
            return Err(TerrainError::UnsupportedZoom {
                zoom: request.zoom,
                source_name: self.source.name().to_string(),
                min: self.source.min_zoom(),
                max: self.source.max_zoom(),
            });
        }
        if request.output_resolution == 0 {
            return Err(TerrainError::InvalidResolution);
        }

        let range = TileRange::from_bounds(&bounds, request.zoom);
        if range.tile_count() > self.max_tiles {
            return Err(TerrainError::TooManyTiles {
                count: range.tile_count(),
                max: self.max_tiles,
            });
        }
        if range.mosaic_size(TILE_SIZE).is_none() {
            return Err(MosaicError::TooLarge {
                columns: range.columns(),
                rows: range.rows(),
                tile_size: TILE_SIZE,
            }
            .into());
        }

        Ok((bounds, range))
    }

    /// Fetches the tiles under the request's bounds and produces a normalized
    /// heightmap of `output_resolution`².
    ///
    /// Missing tiles become gaps; the call fails only if nothing could be
    /// fetched, the request is invalid, or `cancellation_token` fires.
    #[instrument(skip_all, fields(zoom = request.zoom))]
    pub async fn fetch_heightmap(
        &self,
        request: &TerrainRequest,
        cancellation_token: CancellationToken,
    ) -> Result<DemHeightmap, TerrainError> {
        let start = Instant::now();
        let (bounds, range) = self.plan(request)?;

        debug!(
            x_min = range.x_min,
            x_max = range.x_max,
            y_min = range.y_min,
            y_max = range.y_max,
            tiles = range.tile_count(),
            "Resolved tile range"
        );

        let results = fetch_tiles(
            range,
            Arc::clone(&self.source),
            &self.fetch_config,
            cancellation_token.clone(),
        )
        .await?;

        let resolution = request.output_resolution;
        let filter = request.filter;
        let dem = self
            .executor
            .execute_blocking(move || render_heightmap(results, bounds, resolution, filter))
            .await
            .map_err(|e| TerrainError::Internal(format!("heightmap task failed: {}", e)))??;

        // A newer request may have superseded this one while rasterizing
        if cancellation_token.is_cancelled() {
            return Err(TerrainError::Cancelled);
        }

        info!(
            loaded = dem.summary.loaded_tiles,
            requested = dem.summary.requested_tiles,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "{}",
            dem.summary
        );

        Ok(dem)
    }

    /// Builds the request's plane and displaces it by `heightmap`.
    pub fn build_mesh(
        &self,
        request: &TerrainRequest,
        heightmap: Option<&Heightmap>,
    ) -> Result<MeshGrid, TerrainError> {
        let mut mesh = MeshGrid::plane(request.mesh_size, request.segments);
        displace(&mut mesh, heightmap, request.exaggeration)?;
        Ok(mesh)
    }

    /// Re-applies displacement with a new scale.
    pub fn redisplace(
        &self,
        mesh: &mut MeshGrid,
        heightmap: Option<&Heightmap>,
        scale: f32,
    ) -> Result<(), TerrainError> {
        displace(mesh, heightmap, scale)?;
        Ok(())
    }
}

/// Raster stages: mosaic, decode, normalize, crop.
///
/// The gray scale spans the whole mosaic's elevation range, so relief outside
/// the requested bounds still sets the contrast of the crop.
fn render_heightmap(
    results: TileResults,
    bounds: GeoBounds,
    resolution: u32,
    filter: ResampleFilter,
) -> Result<DemHeightmap, TerrainError> {
    let mosaic = compose_mosaic(&results, TILE_SIZE)?;
    let grid = decode_terrarium(mosaic.raster());
    let gray = normalize(&grid);

    let (width, height) = gray.dimensions();
    let rect = CropRect::from_bounds(&mosaic.extent(), &bounds, width, height);
    let heightmap = Heightmap::from_raster(resample(&gray, &rect, resolution, resolution, filter));

    debug!(
        crop_x = rect.x,
        crop_y = rect.y,
        crop_width = rect.width,
        crop_height = rect.height,
        valid = grid.valid_count(),
        "Heightmap rendered"
    );

    Ok(DemHeightmap {
        heightmap,
        summary: DemSummary {
            requested_tiles: results.requested_count(),
            loaded_tiles: results.success_count(),
            missing_tiles: mosaic.missing_tiles().to_vec(),
            range: grid.range(),
            valid_samples: grid.valid_count(),
        },
    })
}
