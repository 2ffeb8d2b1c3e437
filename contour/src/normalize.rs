//! Elevation grid to 8-bit grayscale heightmap.

use crate::elevation::{is_valid_elevation, ElevationGrid};
use image::{Rgba, RgbaImage};

/// Maps each valid sample linearly onto `0..=255` using the grid's own range.
///
/// Invalid samples, and every sample of a grid whose range is absent or flat,
/// become 0. The gray value is written to R, G and B with opaque alpha.
pub fn normalize(grid: &ElevationGrid) -> RgbaImage {
    let range = grid.range().filter(|range| !range.is_flat());

    RgbaImage::from_fn(grid.width(), grid.height(), |x, y| {
        let gray = match (range, grid.get(x, y)) {
            (Some(range), Some(value)) if is_valid_elevation(value) => {
                (255.0 * (value - range.min) / range.span())
                    .round()
                    .clamp(0.0, 255.0) as u8
            }
            _ => 0,
        };
        Rgba([gray, gray, gray, 255])
    })
}
