//! Common argument groups and output helpers shared across CLI commands.

use clap::{Args, ValueEnum};
use contour::config::{ConfigFile, MAX_MESH_SEGMENTS};
use contour::coord::GeoBounds;
use contour::crop::ResampleFilter;
use contour::mesh::MeshGrid;
use contour::pipeline::TerrainRequest;
use contour::provider::TERRARIUM_MAX_ZOOM;

use crate::error::CliError;

/// Geographic area selection.
#[derive(Debug, Clone, Args)]
pub struct BoundsArgs {
    /// Northern edge latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub north: f64,

    /// Southern edge latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub south: f64,

    /// Eastern edge longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub east: f64,

    /// Western edge longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub west: f64,
}

impl BoundsArgs {
    /// Validate into [`GeoBounds`].
    pub fn to_bounds(&self) -> Result<GeoBounds, CliError> {
        Ok(GeoBounds::new(self.north, self.south, self.east, self.west)?)
    }
}

/// Resampling filter selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum FilterType {
    /// Nearest source pixel (blocky, exact tile values)
    Nearest,
    /// Smooth interpolation between source pixels
    Bilinear,
}

impl From<FilterType> for ResampleFilter {
    fn from(filter: FilterType) -> Self {
        match filter {
            FilterType::Nearest => ResampleFilter::Nearest,
            FilterType::Bilinear => ResampleFilter::Bilinear,
        }
    }
}

/// Mesh shape overrides. Unset values come from the `[mesh]` config section.
#[derive(Debug, Clone, Default, Args)]
pub struct MeshArgs {
    /// Grid subdivisions per side
    #[arg(long)]
    pub segments: Option<u32>,

    /// Height of a white heightmap pixel in world units
    #[arg(long)]
    pub exaggeration: Option<f32>,

    /// Edge length of the terrain plane in world units
    #[arg(long)]
    pub size: Option<f32>,
}

impl MeshArgs {
    /// Apply overrides on top of a config-seeded request.
    pub fn apply(&self, mut request: TerrainRequest) -> Result<TerrainRequest, CliError> {
        if let Some(segments) = self.segments {
            check_range("segments", segments, 1, MAX_MESH_SEGMENTS)?;
            request = request.with_segments(segments);
        }
        if let Some(exaggeration) = self.exaggeration {
            request = request.with_exaggeration(exaggeration);
        }
        if let Some(size) = self.size {
            request = request.with_mesh_size(size);
        }
        Ok(request)
    }
}

/// Resolve the zoom level from CLI and config.
pub fn resolve_zoom(cli_zoom: Option<u8>, config: &ConfigFile) -> Result<u8, CliError> {
    let zoom = cli_zoom.unwrap_or(config.dem.zoom);
    check_range("zoom", zoom, 0, TERRARIUM_MAX_ZOOM)?;
    Ok(zoom)
}

/// Reject a numeric option outside `min..=max`.
pub fn check_range<T>(name: &'static str, value: T, min: T, max: T) -> Result<(), CliError>
where
    T: Copy + PartialOrd + Into<u64>,
{
    if value < min || value > max {
        return Err(CliError::InvalidArgument {
            name,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        });
    }
    Ok(())
}

/// Print vertex, triangle and height statistics for a mesh.
pub fn print_mesh_stats(mesh: &MeshGrid) {
    println!(
        "Mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    if let Some((low, high)) = mesh.z_range() {
        println!("  Height range: {:.2} - {:.2}", low, high);
    }
}
