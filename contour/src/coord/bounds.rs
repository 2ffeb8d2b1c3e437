//! Geographic bounding boxes.

use super::types::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use thiserror::Error;

/// Errors produced when validating a [`GeoBounds`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// One of the edges is NaN or infinite
    #[error("bounds contain a non-finite value ({edge} = {value})")]
    NonFinite { edge: &'static str, value: f64 },

    /// North edge is not strictly north of the south edge
    #[error("north ({north}) must be greater than south ({south})")]
    InvertedLatitude { north: f64, south: f64 },

    /// East edge is not strictly east of the west edge
    #[error("east ({east}) must be greater than west ({west})")]
    InvertedLongitude { east: f64, west: f64 },

    /// Latitude outside the Web Mercator range
    #[error(
        "latitude {0} is outside the Web Mercator range ({min} to {max})",
        min = MIN_LAT,
        max = MAX_LAT
    )]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180]
    #[error(
        "longitude {0} is outside the valid range ({min} to {max})",
        min = MIN_LON,
        max = MAX_LON
    )]
    LongitudeOutOfRange(f64),
}

/// A north/south/east/west box in signed decimal degrees.
///
/// Construct through [`GeoBounds::new`], which rejects inverted or
/// out-of-range edges. Edges are never swapped to make a box valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl GeoBounds {
    /// Creates validated bounds.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, BoundsError> {
        for (edge, value) in [
            ("north", north),
            ("south", south),
            ("east", east),
            ("west", west),
        ] {
            if !value.is_finite() {
                return Err(BoundsError::NonFinite { edge, value });
            }
        }
        for lat in [north, south] {
            if !(MIN_LAT..=MAX_LAT).contains(&lat) {
                return Err(BoundsError::LatitudeOutOfRange(lat));
            }
        }
        for lon in [east, west] {
            if !(MIN_LON..=MAX_LON).contains(&lon) {
                return Err(BoundsError::LongitudeOutOfRange(lon));
            }
        }
        if north <= south {
            return Err(BoundsError::InvertedLatitude { north, south });
        }
        if east <= west {
            return Err(BoundsError::InvertedLongitude { east, west });
        }

        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    #[inline]
    pub fn north(&self) -> f64 {
        self.north
    }

    #[inline]
    pub fn south(&self) -> f64 {
        self.south
    }

    #[inline]
    pub fn east(&self) -> f64 {
        self.east
    }

    #[inline]
    pub fn west(&self) -> f64 {
        self.west
    }

    /// Latitude span in degrees.
    #[inline]
    pub fn height_degrees(&self) -> f64 {
        self.north - self.south
    }

    /// Longitude span in degrees.
    #[inline]
    pub fn width_degrees(&self) -> f64 {
        self.east - self.west
    }
}
