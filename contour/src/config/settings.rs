//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use crate::crop::ResampleFilter;
use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Elevation tile source settings
    pub provider: ProviderSettings,
    /// Heightmap generation settings
    pub dem: DemSettings,
    /// Tile download settings
    pub download: DownloadSettings,
    /// Terrain mesh settings
    pub mesh: MeshSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Elevation tile source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Terrarium tile URL template with `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
}

/// Heightmap generation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DemSettings {
    /// Zoom level used for elevation tiles
    pub zoom: u8,
    /// Side length of the square output heightmap in pixels
    pub output_resolution: u32,
    /// Filter used when resampling the cropped mosaic
    pub resample: ResampleFilter,
}

/// Tile download configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Per-tile timeout in seconds
    pub timeout: u64,
    /// Maximum concurrent tile requests (0 = one request per tile at once)
    pub max_concurrent: usize,
    /// Largest tile range a single request may cover
    pub max_tiles: usize,
}

/// Terrain mesh configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSettings {
    /// Edge length of the square plane in world units
    pub size: f32,
    /// Grid subdivisions per side
    pub segments: u32,
    /// Height exaggeration applied to the unit heightmap
    pub exaggeration: f32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
