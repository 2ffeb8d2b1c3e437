//! Rectangular tile ranges and their geographic extent.

use super::{tile_edge_to_lat_lon, to_tile_coords, GeoBounds, TileCoord};

/// Inclusive rectangle of tiles at one zoom level.
///
/// Recomputed per request; owns no resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRange {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
    pub zoom: u8,
}

/// Geographic extent of a tile range, from the NW corner of its first tile to
/// the SE corner of its last tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicExtent {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl TileRange {
    /// Creates a range from explicit corners, normalising min/max order.
    pub fn new(x0: u32, x1: u32, y0: u32, y1: u32, zoom: u8) -> Self {
        Self {
            x_min: x0.min(x1),
            x_max: x0.max(x1),
            y_min: y0.min(y1),
            y_max: y0.max(y1),
            zoom,
        }
    }

    /// Returns the tiles covering `bounds` at `zoom`.
    pub fn from_bounds(bounds: &GeoBounds, zoom: u8) -> Self {
        let nw = to_tile_coords(bounds.north(), bounds.west(), zoom);
        let se = to_tile_coords(bounds.south(), bounds.east(), zoom);
        Self::new(nw.x, se.x, nw.y, se.y, zoom)
    }

    /// Number of tile columns.
    #[inline]
    pub fn columns(&self) -> u64 {
        (self.x_max - self.x_min) as u64 + 1
    }

    /// Number of tile rows.
    #[inline]
    pub fn rows(&self) -> u64 {
        (self.y_max - self.y_min) as u64 + 1
    }

    /// Total number of tiles in the range, saturating at `usize::MAX`.
    #[inline]
    pub fn tile_count(&self) -> usize {
        usize::try_from(self.columns().saturating_mul(self.rows())).unwrap_or(usize::MAX)
    }

    /// Returns true if `tile` lies inside this range.
    pub fn contains(&self, tile: &TileCoord) -> bool {
        tile.zoom == self.zoom
            && (self.x_min..=self.x_max).contains(&tile.x)
            && (self.y_min..=self.y_max).contains(&tile.y)
    }

    /// Pixel dimensions of a mosaic assembled from this range, or `None` if
    /// either side would not fit in a `u32`.
    pub fn mosaic_size(&self, tile_size: u32) -> Option<(u32, u32)> {
        let width = self.columns().checked_mul(tile_size as u64)?;
        let height = self.rows().checked_mul(tile_size as u64)?;
        Some((u32::try_from(width).ok()?, u32::try_from(height).ok()?))
    }

    /// Pixel offset of `tile` inside the mosaic.
    #[inline]
    pub fn pixel_origin(&self, tile: &TileCoord, tile_size: u32) -> (u32, u32) {
        (
            (tile.x - self.x_min) * tile_size,
            (tile.y - self.y_min) * tile_size,
        )
    }

    /// Geographic extent covered by the whole range.
    pub fn extent(&self) -> MosaicExtent {
        let nw = tile_edge_to_lat_lon(self.x_min as f64, self.y_min as f64, self.zoom);
        let se = tile_edge_to_lat_lon(
            self.x_max as f64 + 1.0,
            self.y_max as f64 + 1.0,
            self.zoom,
        );
        MosaicExtent {
            north: nw.lat,
            south: se.lat,
            east: se.lon,
            west: nw.lon,
        }
    }

    /// Iterates every tile in the range in row-major order.
    #[inline]
    pub fn tiles(&self) -> TileRangeIter {
        TileRangeIter {
            range: *self,
            current: 0,
        }
    }
}

/// Iterator over all tiles of a [`TileRange`], row-major.
#[derive(Debug, Clone)]
pub struct TileRangeIter {
    range: TileRange,
    current: usize,
}

impl Iterator for TileRangeIter {
    type Item = TileCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.range.tile_count() {
            return None;
        }

        let columns = self.range.columns() as usize;
        let x = self.range.x_min + (self.current % columns) as u32;
        let y = self.range.y_min + (self.current / columns) as u32;
        self.current += 1;

        Some(TileCoord::new(x, y, self.range.zoom))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range.tile_count() - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileRangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn alps() -> GeoBounds {
        GeoBounds::new(45.1, 45.0, 7.1, 7.0).unwrap()
    }

    #[test]
    fn test_from_bounds_covers_four_tiles() {
        let range = TileRange::from_bounds(&alps(), 11);

        assert_eq!(range.x_min, 1063);
        assert_eq!(range.x_max, 1064);
        assert_eq!(range.y_min, 735);
        assert_eq!(range.y_max, 736);
        assert_eq!(range.tile_count(), 4);
    }

    #[test]
    fn test_new_normalises_corner_order() {
        let range = TileRange::new(5, 3, 9, 7, 4);
        assert_eq!((range.x_min, range.x_max), (3, 5));
        assert_eq!((range.y_min, range.y_max), (7, 9));
    }

    #[test]
    fn test_tiles_row_major() {
        let range = TileRange::new(10, 11, 20, 21, 6);
        let tiles: Vec<_> = range.tiles().collect();

        assert_eq!(
            tiles,
            vec![
                TileCoord::new(10, 20, 6),
                TileCoord::new(11, 20, 6),
                TileCoord::new(10, 21, 6),
                TileCoord::new(11, 21, 6),
            ]
        );
        assert_eq!(range.tiles().len(), 4);
    }

    #[test]
    fn test_mosaic_size_and_origin() {
        let range = TileRange::new(10, 12, 20, 21, 6);
        assert_eq!(range.mosaic_size(256), Some((768, 512)));
        assert_eq!(
            range.pixel_origin(&TileCoord::new(12, 21, 6), 256),
            (512, 256)
        );
    }

    #[test]
    fn test_extent_encloses_bounds() {
        let bounds = alps();
        let extent = TileRange::from_bounds(&bounds, 11).extent();

        assert!(extent.north >= bounds.north());
        assert!(extent.south <= bounds.south());
        assert!(extent.west <= bounds.west());
        assert!(extent.east >= bounds.east());
    }

    #[test]
    fn test_contains() {
        let range = TileRange::new(10, 11, 20, 21, 6);
        assert!(range.contains(&TileCoord::new(11, 21, 6)));
        assert!(!range.contains(&TileCoord::new(12, 21, 6)));
        assert!(!range.contains(&TileCoord::new(11, 21, 7)));
    }

    #[test]
    fn test_oversized_range_does_not_overflow() {
        let world = GeoBounds::new(80.0, -80.0, 179.0, -179.0).unwrap();

        for zoom in [25, 40, 70] {
            let range = TileRange::from_bounds(&world, zoom);
            assert!(range.columns() > u32::MAX as u64 / 256);
            assert_eq!(range.mosaic_size(256), None);

            let extent = range.extent();
            assert!(extent.north.is_finite() && extent.south.is_finite());
            assert!(extent.east > extent.west);
        }

        // Indices saturate past zoom 31, so only a representable zoom keeps
        // the full longitude span
        let extent = TileRange::from_bounds(&world, 25).extent();
        assert!(extent.west <= -179.0 && extent.east >= 179.0);

        let full = TileRange::new(0, u32::MAX, 0, u32::MAX, 32);
        assert_eq!(full.columns(), 1 << 32);
        assert_eq!(full.tile_count(), usize::try_from(u64::MAX).unwrap_or(usize::MAX));
    }
}
