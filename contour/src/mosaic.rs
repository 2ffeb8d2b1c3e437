//! Mosaic compositor - places fetched tiles onto one raster.
//!
//! The canvas starts zero-initialised, so every tile that was not fetched
//! stays transparent black (`[0, 0, 0, 0]`). Terrarium tiles are opaque, which
//! makes alpha a reliable gap marker. Gap pixels decode to -32768 m and are
//! excluded downstream.

use crate::coord::{MosaicExtent, TileCoord, TileRange};
use crate::fetch::TileResults;
use image::{Rgba, RgbaImage};
use thiserror::Error;
use tracing::debug;

/// Pixel value of a mosaic gap.
pub const GAP_PIXEL: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Errors from composing a mosaic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MosaicError {
    /// The raster for the range would exceed `u32` pixels on a side
    #[error("{columns}x{rows} tiles of {tile_size}px do not fit in one raster")]
    TooLarge {
        columns: u64,
        rows: u64,
        tile_size: u32,
    },
}

/// Raster covering a whole tile range.
#[derive(Debug, Clone)]
pub struct Mosaic {
    raster: RgbaImage,
    range: TileRange,
    tile_size: u32,
    missing: Vec<TileCoord>,
}

impl Mosaic {
    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    pub fn into_raster(self) -> RgbaImage {
        self.raster
    }

    pub fn range(&self) -> TileRange {
        self.range
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Geographic extent of the raster.
    pub fn extent(&self) -> MosaicExtent {
        self.range.extent()
    }

    /// Tiles of the range that had no image, row-major.
    pub fn missing_tiles(&self) -> &[TileCoord] {
        &self.missing
    }

    /// Number of transparent pixels.
    pub fn gap_pixel_count(&self) -> usize {
        self.raster.pixels().filter(|p| p[3] == 0).count()
    }
}

/// Composes present tiles into a mosaic for `results.range()`.
///
/// Each tile is copied to its slot and clipped to `tile_size`; tiles smaller
/// than `tile_size` leave the rest of their slot as gap.
pub fn compose_mosaic(results: &TileResults, tile_size: u32) -> Result<Mosaic, MosaicError> {
    let range = results.range();
    let (width, height) = range
        .mosaic_size(tile_size)
        .ok_or(MosaicError::TooLarge {
            columns: range.columns(),
            rows: range.rows(),
            tile_size,
        })?;
    let mut raster = RgbaImage::new(width, height);
    let mut missing = Vec::new();

    for tile in range.tiles() {
        match results.get(&tile) {
            Some(image) => {
                let (x_offset, y_offset) = range.pixel_origin(&tile, tile_size);
                place_tile(&mut raster, image, x_offset, y_offset, tile_size);
            }
            None => missing.push(tile),
        }
    }

    debug!(
        width,
        height,
        placed = range.tile_count() - missing.len(),
        missing = missing.len(),
        "Mosaic composed"
    );

    Ok(Mosaic {
        raster,
        range,
        tile_size,
        missing,
    })
}

/// Copies `tile` onto the canvas at the given offset.
fn place_tile(canvas: &mut RgbaImage, tile: &RgbaImage, x_offset: u32, y_offset: u32, tile_size: u32) {
    let tile_width = tile.width().min(tile_size);
    let tile_height = tile.height().min(tile_size);

    for y in 0..tile_height {
        for x in 0..tile_width {
            canvas.put_pixel(x_offset + x, y_offset + y, *tile.get_pixel(x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::TileFailureReason;
    use crate::provider::ProviderError;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn range() -> TileRange {
        TileRange::new(100, 101, 200, 201, 9)
    }

    fn results_with(present: &[(u32, u32)], tile_size: u32) -> TileResults {
        let mut results = TileResults::new(range());
        for tile in range().tiles() {
            if present.contains(&(tile.x, tile.y)) {
                results.add_success(tile, RgbaImage::from_pixel(tile_size, tile_size, RED));
            } else {
                results.add_failure(
                    tile,
                    TileFailureReason::Provider(ProviderError::HttpError("HTTP 404".into())),
                );
            }
        }
        results
    }

    #[test]
    fn test_complete_mosaic_has_no_gaps() {
        let results = results_with(&[(100, 200), (101, 200), (100, 201), (101, 201)], 16);

        let mosaic = compose_mosaic(&results, 16).unwrap();

        assert_eq!(mosaic.raster().dimensions(), (32, 32));
        assert_eq!(mosaic.gap_pixel_count(), 0);
        assert!(mosaic.missing_tiles().is_empty());
    }

    #[test]
    fn test_non_gap_pixels_match_present_tiles() {
        let results = results_with(&[(100, 200), (101, 201), (100, 201)], 16);

        let mosaic = compose_mosaic(&results, 16).unwrap();

        let total = 32 * 32;
        assert_eq!(total - mosaic.gap_pixel_count(), 3 * 16 * 16);
        assert_eq!(mosaic.missing_tiles(), &[TileCoord::new(101, 200, 9)]);
    }

    #[test]
    fn test_gap_slot_is_transparent_black() {
        let results = results_with(&[(100, 200)], 16);

        let mosaic = compose_mosaic(&results, 16).unwrap();

        assert_eq!(*mosaic.raster().get_pixel(0, 0), RED);
        assert_eq!(*mosaic.raster().get_pixel(15, 15), RED);
        assert_eq!(*mosaic.raster().get_pixel(16, 0), GAP_PIXEL);
        assert_eq!(*mosaic.raster().get_pixel(31, 31), GAP_PIXEL);
    }

    #[test]
    fn test_oversized_tile_is_clipped() {
        let mut results = TileResults::new(range());
        results.add_success(
            TileCoord::new(101, 201, 9),
            RgbaImage::from_pixel(24, 24, RED),
        );

        let mosaic = compose_mosaic(&results, 16).unwrap();

        assert_eq!(mosaic.raster().dimensions(), (32, 32));
        assert_eq!(mosaic.gap_pixel_count(), 32 * 32 - 16 * 16);
        assert_eq!(*mosaic.raster().get_pixel(31, 31), RED);
    }

    #[test]
    fn test_undersized_tile_leaves_partial_gap() {
        let mut results = TileResults::new(range());
        results.add_success(
            TileCoord::new(100, 200, 9),
            RgbaImage::from_pixel(8, 8, RED),
        );

        let mosaic = compose_mosaic(&results, 16).unwrap();

        assert_eq!(mosaic.gap_pixel_count(), 32 * 32 - 8 * 8);
        assert_eq!(*mosaic.raster().get_pixel(8, 0), GAP_PIXEL);
    }

    #[test]
    fn test_extent_delegates_to_range() {
        let mosaic = compose_mosaic(&results_with(&[(100, 200)], 16), 16).unwrap();
        assert_eq!(mosaic.extent(), range().extent());
        assert_eq!(mosaic.tile_size(), 16);
    }

    #[test]
    fn test_range_wider_than_a_raster_is_rejected() {
        let wide = TileRange::new(0, 20_000_000, 0, 0, 25);

        let err = compose_mosaic(&TileResults::new(wide), 256).unwrap_err();

        assert_eq!(
            err,
            MosaicError::TooLarge {
                columns: 20_000_001,
                rows: 1,
                tile_size: 256,
            }
        );
    }
}
