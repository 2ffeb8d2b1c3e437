//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::crop::ResampleFilter;
use crate::provider::DEFAULT_TERRARIUM_URL;

/// Zoom level used for elevation tiles.
pub const DEFAULT_DEM_ZOOM: u8 = 11;

/// Side length of the generated heightmap.
pub const DEFAULT_OUTPUT_RESOLUTION: u32 = 512;

/// Largest accepted heightmap side length.
pub const MAX_OUTPUT_RESOLUTION: u32 = 4096;

/// Per-tile fetch timeout.
pub const DEFAULT_TILE_TIMEOUT_SECS: u64 = 5;

/// 0 means every tile of a range is requested at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 0;

/// Largest tile range fetched for one request (8×8 tiles).
pub const DEFAULT_MAX_TILES: usize = 64;

/// Edge length of the terrain plane.
pub const DEFAULT_MESH_SIZE: f32 = 100.0;

/// Grid subdivisions per side of the terrain plane.
pub const DEFAULT_MESH_SEGMENTS: u32 = 256;

/// Largest accepted subdivision count.
pub const MAX_MESH_SEGMENTS: u32 = 2048;

/// Height exaggeration.
pub const DEFAULT_EXAGGERATION: f32 = 10.0;

/// Pixel size of one elevation tile.
pub const TILE_SIZE: u32 = 256;

/// Default log file location (~/.contour/contour.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join("contour.log")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            provider: ProviderSettings {
                url_template: DEFAULT_TERRARIUM_URL.to_string(),
            },
            dem: DemSettings {
                zoom: DEFAULT_DEM_ZOOM,
                output_resolution: DEFAULT_OUTPUT_RESOLUTION,
                resample: ResampleFilter::default(),
            },
            download: DownloadSettings {
                timeout: DEFAULT_TILE_TIMEOUT_SECS,
                max_concurrent: DEFAULT_MAX_CONCURRENT,
                max_tiles: DEFAULT_MAX_TILES,
            },
            mesh: MeshSettings {
                size: DEFAULT_MESH_SIZE,
                segments: DEFAULT_MESH_SEGMENTS,
                exaggeration: DEFAULT_EXAGGERATION,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
