//! Result of a heightmap request.

use crate::coord::TileCoord;
use crate::elevation::ElevationRange;
use crate::heightmap::Heightmap;
use std::fmt;

/// Statistics reported to the user once a heightmap is ready.
#[derive(Debug, Clone, PartialEq)]
pub struct DemSummary {
    /// Tiles covering the bounds
    pub requested_tiles: usize,
    /// Tiles that were fetched and decoded
    pub loaded_tiles: usize,
    /// Tiles that became gaps
    pub missing_tiles: Vec<TileCoord>,
    /// Elevation range of the whole mosaic, over samples above sea level
    pub range: Option<ElevationRange>,
    /// Samples above sea level in the mosaic
    pub valid_samples: usize,
}

impl DemSummary {
    /// True if the heightmap carries no relief.
    pub fn is_flat(&self) -> bool {
        self.range.map_or(true, |range| range.is_flat())
    }
}

impl fmt::Display for DemSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some(range) if !range.is_flat() => {
                write!(f, "DEM loaded: {:.0}m - {:.0}m", range.min, range.max)
            }
            Some(range) => write!(f, "DEM loaded: flat terrain at {:.0}m", range.min),
            None => write!(f, "DEM loaded: no terrain above sea level"),
        }
    }
}

/// Normalized heightmap plus the summary that produced it.
#[derive(Debug, Clone)]
pub struct DemHeightmap {
    pub heightmap: Heightmap,
    pub summary: DemSummary,
}
