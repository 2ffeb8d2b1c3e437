//! Per-invocation terrain request.

use crate::config::{
    ConfigFile, DEFAULT_DEM_ZOOM, DEFAULT_EXAGGERATION, DEFAULT_MESH_SEGMENTS, DEFAULT_MESH_SIZE,
    DEFAULT_OUTPUT_RESOLUTION,
};
use crate::coord::GeoBounds;
use crate::crop::ResampleFilter;

/// Everything needed to turn an area into a heightmap and a mesh.
///
/// Owned by the caller and passed explicitly; nothing is remembered between
/// requests.
///
/// # Example
///
/// ```
/// use contour::coord::GeoBounds;
/// use contour::pipeline::TerrainRequest;
///
/// let bounds = GeoBounds::new(45.1, 45.0, 7.1, 7.0).unwrap();
/// let request = TerrainRequest::new()
///     .with_bounds(bounds)
///     .with_exaggeration(4.0);
///
/// assert_eq!(request.zoom, 11);
/// assert_eq!(request.output_resolution, 512);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainRequest {
    /// Selected area; `None` until the user picks one
    pub bounds: Option<GeoBounds>,
    /// Zoom level for elevation tiles
    pub zoom: u8,
    /// Side length of the square heightmap
    pub output_resolution: u32,
    /// Resampling filter for the crop
    pub filter: ResampleFilter,
    /// Edge length of the mesh plane
    pub mesh_size: f32,
    /// Mesh subdivisions per side
    pub segments: u32,
    /// Height of a white heightmap pixel in world units
    pub exaggeration: f32,
}

impl Default for TerrainRequest {
    fn default() -> Self {
        Self {
            bounds: None,
            zoom: DEFAULT_DEM_ZOOM,
            output_resolution: DEFAULT_OUTPUT_RESOLUTION,
            filter: ResampleFilter::default(),
            mesh_size: DEFAULT_MESH_SIZE,
            segments: DEFAULT_MESH_SEGMENTS,
            exaggeration: DEFAULT_EXAGGERATION,
        }
    }
}

impl TerrainRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request seeded from the `[dem]` and `[mesh]` config sections.
    pub fn from_config(config: &ConfigFile) -> Self {
        Self {
            bounds: None,
            zoom: config.dem.zoom,
            output_resolution: config.dem.output_resolution,
            filter: config.dem.resample,
            mesh_size: config.mesh.size,
            segments: config.mesh.segments,
            exaggeration: config.mesh.exaggeration,
        }
    }

    pub fn with_bounds(mut self, bounds: GeoBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_output_resolution(mut self, resolution: u32) -> Self {
        self.output_resolution = resolution;
        self
    }

    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_mesh_size(mut self, size: f32) -> Self {
        self.mesh_size = size;
        self
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    pub fn with_exaggeration(mut self, exaggeration: f32) -> Self {
        self.exaggeration = exaggeration;
        self
    }
}
