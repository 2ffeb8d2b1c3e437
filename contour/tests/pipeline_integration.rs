//! Integration tests for the terrain pipeline.
//!
//! These tests drive the public API end to end through a real
//! `TerrariumSource` backed by an in-memory tile server:
//! - Bounds to heightmap with one failed tile
//! - All-sea areas yielding a flat result
//! - Request validation before any network call
//! - Supersession of an in-flight request

use contour::config::{FetchConfig, TILE_SIZE};
use contour::coord::{GeoBounds, TileCoord};
use contour::elevation::encode_terrarium;
use contour::pipeline::{RequestGate, SyncExecutor, TerrainError, TerrainPipeline, TerrainRequest};
use contour::provider::{AsyncHttpClient, ProviderError, TerrariumSource};
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// =============================================================================
// Test Helpers
// =============================================================================

const TEMPLATE: &str = "http://tiles.test/{z}/{x}/{y}.png";

#[derive(Clone, Copy)]
enum Terrain {
    /// Elevation rising from west to east within each tile
    Ramp,
    /// Everything at sea level
    Sea,
}

/// In-memory Terrarium tile server.
struct TileServer {
    terrain: Terrain,
    failing: Vec<(u32, u32)>,
    stall: bool,
    requests: Mutex<Vec<String>>,
}

impl TileServer {
    fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            failing: Vec::new(),
            stall: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(mut self, x: u32, y: u32) -> Self {
        self.failing.push((x, y));
        self
    }

    fn stalling(mut self) -> Self {
        self.stall = true;
        self
    }

    fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn parse(url: &str) -> Option<(u32, u32, u32)> {
        let path = url.strip_prefix("http://tiles.test/")?.strip_suffix(".png")?;
        let mut parts = path.split('/').map(|p| p.parse::<u32>().ok());
        Some((parts.next()??, parts.next()??, parts.next()??))
    }

    fn render(&self, x: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(TILE_SIZE, TILE_SIZE, |px, py| {
            let elevation = match self.terrain {
                Terrain::Ramp => 300.0 + (x % 4) as f32 * 400.0 + px as f32 + py as f32 * 0.5,
                Terrain::Sea => 0.0,
            };
            let [r, g, b] = encode_terrarium(elevation);
            Rgba([r, g, b, 255])
        });
        let mut buffer = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }
}

/// HTTP client handle onto a shared [`TileServer`].
struct ServerClient(Arc<TileServer>);

impl AsyncHttpClient for ServerClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let server = &self.0;
        server.requests.lock().push(url.to_string());

        if server.stall {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }

        let (_, x, y) = TileServer::parse(url)
            .ok_or_else(|| ProviderError::InvalidResponse(format!("bad url {}", url)))?;
        if server.failing.contains(&(x, y)) {
            return Err(ProviderError::HttpError("HTTP 404 Not Found".to_string()));
        }
        Ok(server.render(x))
    }
}

type Pipeline = TerrainPipeline<TerrariumSource<ServerClient>, SyncExecutor>;

fn pipeline(server: &Arc<TileServer>) -> Pipeline {
    let source = TerrariumSource::with_url_template(ServerClient(Arc::clone(server)), TEMPLATE);
    TerrainPipeline::with_executor(Arc::new(source), SyncExecutor)
        .with_fetch_config(FetchConfig::new().with_timeout(Duration::from_secs(2)))
}

fn alps() -> GeoBounds {
    GeoBounds::new(45.1, 45.0, 7.1, 7.0).unwrap()
}

// =============================================================================
// End to end
// =============================================================================

#[tokio::test]
async fn test_four_tiles_with_one_failure() {
    let server = Arc::new(TileServer::new(Terrain::Ramp).failing(1064, 736));
    let pipeline = pipeline(&server);
    let request = TerrainRequest::new().with_bounds(alps());

    let dem = pipeline
        .fetch_heightmap(&request, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(server.request_count(), 4);
    assert_eq!(dem.summary.requested_tiles, 4);
    assert_eq!(dem.summary.loaded_tiles, 3);
    assert_eq!(dem.summary.missing_tiles, vec![TileCoord::new(1064, 736, 11)]);

    let heightmap = &dem.heightmap;
    assert_eq!((heightmap.width(), heightmap.height()), (512, 512));
    assert!(heightmap.raster().pixels().all(|p| p[3] == 255));
    // Summary describes the whole mosaic, gap tile excluded
    assert_eq!(dem.summary.valid_samples, 3 * 256 * 256);

    let range = dem.summary.range.unwrap();
    assert!(range.min >= 300.0 && range.max > range.min);
    assert!(dem.summary.to_string().starts_with("DEM loaded: "));

    let mesh = pipeline.build_mesh(&request, Some(heightmap)).unwrap();
    assert_eq!(mesh.vertex_count(), 257 * 257);
    assert_eq!(mesh.triangle_count(), 256 * 256 * 2);
    assert!(mesh
        .positions
        .iter()
        .all(|p| p[2].is_finite() && (0.0..=request.exaggeration).contains(&p[2])));
    assert!(mesh.normals.iter().flatten().all(|c| c.is_finite()));
}

#[tokio::test]
async fn test_all_sea_is_flat() {
    let server = Arc::new(TileServer::new(Terrain::Sea));
    let pipeline = pipeline(&server);
    let request = TerrainRequest::new().with_bounds(alps());

    let dem = pipeline
        .fetch_heightmap(&request, CancellationToken::new())
        .await
        .unwrap();

    assert!(dem.summary.range.is_none());
    assert!(dem.summary.is_flat());
    assert!(dem.heightmap.raster().pixels().all(|p| p.0 == [0, 0, 0, 255]));

    let mesh = pipeline.build_mesh(&request, Some(&dem.heightmap)).unwrap();
    assert_eq!(mesh.z_range(), Some((0.0, 0.0)));
}

#[tokio::test]
async fn test_every_tile_failing_suggests_alternative() {
    let server = Arc::new(
        TileServer::new(Terrain::Ramp)
            .failing(1063, 735)
            .failing(1064, 735)
            .failing(1063, 736)
            .failing(1064, 736),
    );
    let pipeline = pipeline(&server);
    let request = TerrainRequest::new().with_bounds(alps());

    let err = pipeline
        .fetch_heightmap(&request, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TerrainError::NoDataAvailable { requested: 4 }));
    assert!(err.to_string().contains("alternative heightmap"));
}

#[tokio::test]
async fn test_heightmap_png_roundtrips_into_mesh() {
    let server = Arc::new(TileServer::new(Terrain::Ramp));
    let pipeline = pipeline(&server);
    let request = TerrainRequest::new()
        .with_bounds(alps())
        .with_output_resolution(128)
        .with_segments(32);

    let dem = pipeline
        .fetch_heightmap(&request, CancellationToken::new())
        .await
        .unwrap();
    let png = dem.heightmap.to_png_bytes().unwrap();
    let external = contour::heightmap::Heightmap::decode(&png).unwrap();

    let from_dem = pipeline.build_mesh(&request, Some(&dem.heightmap)).unwrap();
    let from_png = pipeline.build_mesh(&request, Some(&external)).unwrap();

    assert_eq!(from_dem, from_png);
}

// =============================================================================
// Validation and cancellation
// =============================================================================

#[tokio::test]
async fn test_missing_bounds_makes_no_requests() {
    let server = Arc::new(TileServer::new(Terrain::Ramp));
    let pipeline = pipeline(&server);

    let err = pipeline
        .fetch_heightmap(&TerrainRequest::new(), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TerrainError::MissingBounds));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_zoom_beyond_terrarium_rejected() {
    let server = Arc::new(TileServer::new(Terrain::Ramp));
    let pipeline = pipeline(&server);
    let request = TerrainRequest::new().with_bounds(alps()).with_zoom(17);

    let err = pipeline
        .fetch_heightmap(&request, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TerrainError::UnsupportedZoom { zoom: 17, .. }));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_newer_request_supersedes_older() {
    let server = Arc::new(TileServer::new(Terrain::Ramp).stalling());
    let pipeline = Arc::new(pipeline(&server));
    let gate = Arc::new(RequestGate::new());
    let request = TerrainRequest::new().with_bounds(alps());

    let first = {
        let pipeline = Arc::clone(&pipeline);
        let request = request.clone();
        let token = gate.begin();
        tokio::spawn(async move { pipeline.fetch_heightmap(&request, token).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    let second_token = gate.begin();

    let result = tokio::time::timeout(Duration::from_secs(5), first)
        .await
        .expect("superseded request should finish promptly")
        .unwrap();

    assert!(matches!(result, Err(TerrainError::Cancelled)));
    assert!(!second_token.is_cancelled());
}
