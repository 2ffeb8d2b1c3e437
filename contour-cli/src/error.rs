//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use contour::config::ConfigFileError;
use contour::coord::BoundsError;
use contour::heightmap::HeightmapError;
use contour::pipeline::TerrainError;
use contour::provider::ProviderError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Bounds given on the command line are invalid
    Bounds(BoundsError),
    /// A numeric option is outside its allowed range
    InvalidArgument {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    /// Failed to create the HTTP client
    Provider(ProviderError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Terrain pipeline failed
    Terrain(TerrainError),
    /// Heightmap image could not be used
    Heightmap(HeightmapError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Terrain(TerrainError::NoDataAvailable { .. }) => {
                eprintln!();
                eprintln!("The elevation service returned no usable tiles. You can:");
                eprintln!("  1. Check your network connection and try again");
                eprintln!("  2. Point [provider] url_template at another Terrarium server");
                eprintln!("  3. Build the mesh from your own image: contour displace --heightmap <file>");
            }
            CliError::Terrain(TerrainError::TooManyTiles { .. }) => {
                eprintln!();
                eprintln!("Use a smaller area, pass a lower --zoom, or raise");
                eprintln!("[download] max_tiles in the config file.");
            }
            CliError::Bounds(_) => {
                eprintln!();
                eprintln!("Bounds are decimal degrees: --north > --south, --east > --west,");
                eprintln!("latitudes within ±85.05112878 and longitudes within ±180.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Bounds(e) => write!(f, "Invalid bounds: {}", e),
            CliError::InvalidArgument {
                name,
                value,
                min,
                max,
            } => write!(
                f,
                "Invalid --{}: {} (must be between {} and {})",
                name, value, min, max
            ),
            CliError::Provider(e) => write!(f, "Failed to create tile source: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Terrain(e) => write!(f, "{}", e),
            CliError::Heightmap(e) => write!(f, "{}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Bounds(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Terrain(e) => Some(e),
            CliError::Heightmap(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<BoundsError> for CliError {
    fn from(e: BoundsError) -> Self {
        CliError::Bounds(e)
    }
}

impl From<TerrainError> for CliError {
    fn from(e: TerrainError) -> Self {
        CliError::Terrain(e)
    }
}

impl From<HeightmapError> for CliError {
    fn from(e: HeightmapError) -> Self {
        CliError::Heightmap(e)
    }
}
