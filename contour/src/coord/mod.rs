//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator tile coordinates used by elevation tile services, plus the
//! bounding-box and tile-range types built on them.

mod bounds;
mod range;
mod types;

pub use bounds::{BoundsError, GeoBounds};
pub use range::{MosaicExtent, TileRange, TileRangeIter};
pub use types::{LatLon, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM};

use std::f64::consts::PI;

/// Converts geographic coordinates to tile coordinates.
///
/// Uses the spherical Web Mercator slippy-tile formula. There is no error
/// path: input outside the Web Mercator range produces an edge tile, since
/// the index is clamped into `[0, 2^zoom)`.
#[inline]
pub fn to_tile_coords(lat: f64, lon: f64, zoom: u8) -> TileCoord {
    let n = 2.0_f64.powi(zoom as i32);
    let max_index = n - 1.0;

    let col = ((lon + 180.0) / 360.0 * n).floor();

    let lat_rad = lat * PI / 180.0;
    let row = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor();

    TileCoord {
        x: clamp_index(col, max_index),
        y: clamp_index(row, max_index),
        zoom,
    }
}

/// Clamps a floating tile index into `[0, max]`. NaN maps to 0.
#[inline]
fn clamp_index(value: f64, max: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, max) as u32
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner. `x` and `y`
/// may equal `2^zoom` to address the far edge of the last tile.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> LatLon {
    tile_edge_to_lat_lon(tile.x as f64, tile.y as f64, tile.zoom)
}

/// Geographic position of a fractional tile index.
pub(crate) fn tile_edge_to_lat_lon(x: f64, y: f64, zoom: u8) -> LatLon {
    let n = 2.0_f64.powi(zoom as i32);

    let lon = x / n * 360.0 - 180.0;

    let lat_rad = (PI * (1.0 - 2.0 * y / n)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    LatLon { lat, lon }
}

/// Geographic width and height (degrees) of a tile.
pub fn tile_span_degrees(tile: &TileCoord) -> (f64, f64) {
    let nw = tile_to_lat_lon(tile);
    let se = tile_to_lat_lon(&TileCoord::new(tile.x + 1, tile.y + 1, tile.zoom));
    (se.lon - nw.lon, nw.lat - se.lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_london_at_zoom_10() {
        let tile = to_tile_coords(51.5074, -0.1278, 10);
        assert_eq!(tile.x, 511);
        assert_eq!(tile.y, 340);
        assert_eq!(tile.zoom, 10);
    }

    #[test]
    fn test_new_york_city_at_zoom_16() {
        let tile = to_tile_coords(40.7128, -74.0060, 16);
        assert_eq!(tile.x, 19295);
        assert_eq!(tile.y, 24640);
    }

    #[test]
    fn test_zoom_zero_is_single_tile() {
        assert_eq!(to_tile_coords(60.0, -120.0, 0), TileCoord::new(0, 0, 0));
        assert_eq!(to_tile_coords(-60.0, 120.0, 0), TileCoord::new(0, 0, 0));
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        // lon = 180 would index one past the last column
        let tile = to_tile_coords(0.0, 180.0, 4);
        assert_eq!(tile.x, 15);

        // Beyond the poles the Mercator formula diverges
        assert_eq!(to_tile_coords(89.9, 0.0, 4).y, 0);
        assert_eq!(to_tile_coords(-89.9, 0.0, 4).y, 15);
        assert_eq!(to_tile_coords(f64::NAN, f64::NAN, 4), TileCoord::new(0, 0, 4));
    }

    #[test]
    fn test_tile_to_lat_lon_origin() {
        let corner = tile_to_lat_lon(&TileCoord::new(0, 0, 3));
        assert!((corner.lon - (-180.0)).abs() < 1e-9);
        assert!((corner.lat - MAX_LAT).abs() < 1e-6);
    }

    #[test]
    fn test_tile_to_lat_lon_far_edge() {
        let corner = tile_to_lat_lon(&TileCoord::new(8, 8, 3));
        assert!((corner.lon - 180.0).abs() < 1e-9);
        assert!((corner.lat - MIN_LAT).abs() < 1e-6);
    }

    #[test]
    fn test_tile_to_lat_lon_at_equator() {
        let corner = tile_to_lat_lon(&TileCoord::new(512, 512, 10));
        assert!(corner.lat.abs() < 1e-9);
        assert!(corner.lon.abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip_within_one_tile() {
        let points = [
            (51.5074, -0.1278),
            (45.05, 7.05),
            (-33.8688, 151.2093),
            (64.1466, -21.9426),
            (-0.0001, 0.0001),
        ];

        for zoom in MIN_ZOOM..=MAX_ZOOM {
            for (lat, lon) in points {
                let tile = to_tile_coords(lat, lon, zoom);
                let corner = tile_to_lat_lon(&tile);
                let (width, height) = tile_span_degrees(&tile);

                // NW corner lies north-west of the point, within one tile
                assert!(
                    corner.lon <= lon && lon - corner.lon <= width,
                    "zoom {}: lon {} not within tile starting at {}",
                    zoom,
                    lon,
                    corner.lon
                );
                assert!(
                    corner.lat >= lat && corner.lat - lat <= height,
                    "zoom {}: lat {} not within tile starting at {}",
                    zoom,
                    lat,
                    corner.lat
                );
            }
        }
    }
}
