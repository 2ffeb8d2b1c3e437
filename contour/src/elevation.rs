//! Terrarium elevation decoding.
//!
//! Terrarium tiles pack an elevation into the RGB channels of each pixel:
//!
//! ```text
//! elevation = R * 256 + G + B / 256 - 32768   (meters)
//! ```
//!
//! A sample counts as valid only when it is strictly above zero. This excludes
//! mosaic gaps, which decode to -32768, but it also excludes sea level and
//! anything below it. Both are treated as "no data" for range purposes.

use image::RgbaImage;

/// Offset added to elevations before packing.
pub const TERRARIUM_OFFSET: f32 = 32768.0;

/// Decodes one Terrarium pixel to meters.
///
/// # Example
///
/// ```
/// use contour::elevation::terrarium_elevation;
///
/// assert_eq!(terrarium_elevation(128, 0, 0), 0.0);
/// assert_eq!(terrarium_elevation(0, 0, 0), -32768.0);
/// ```
#[inline]
pub fn terrarium_elevation(r: u8, g: u8, b: u8) -> f32 {
    r as f32 * 256.0 + g as f32 + b as f32 / 256.0 - TERRARIUM_OFFSET
}

/// Packs an elevation into Terrarium RGB. Inverse of [`terrarium_elevation`]
/// to within 1/256 m; values outside the representable range saturate.
pub fn encode_terrarium(elevation: f32) -> [u8; 3] {
    let shifted = (elevation + TERRARIUM_OFFSET).clamp(0.0, 65535.0 + 255.0 / 256.0);
    let whole = shifted.floor();
    let fraction = shifted - whole;
    let whole = whole as u32;

    [
        (whole / 256) as u8,
        (whole % 256) as u8,
        (fraction * 256.0).floor().min(255.0) as u8,
    ]
}

/// Whether a decoded sample contributes to the elevation range.
#[inline]
pub fn is_valid_elevation(value: f32) -> bool {
    value > 0.0
}

/// Minimum and maximum over the valid samples of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    pub min: f32,
    pub max: f32,
}

impl ElevationRange {
    /// Difference between max and min.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// True when every valid sample has the same elevation.
    pub fn is_flat(&self) -> bool {
        self.span() <= 0.0
    }
}

/// Row-major grid of decoded elevations in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    width: u32,
    height: u32,
    values: Vec<f32>,
    range: Option<ElevationRange>,
    valid_count: usize,
}

impl ElevationGrid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All samples in row-major order, including invalid ones.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Elevation at pixel `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Range over valid samples; `None` when the grid has none.
    pub fn range(&self) -> Option<ElevationRange> {
        self.range
    }

    /// Number of samples above zero.
    pub fn valid_count(&self) -> usize {
        self.valid_count
    }
}

/// Decodes every pixel of a Terrarium raster. Alpha is ignored.
pub fn decode_terrarium(raster: &RgbaImage) -> ElevationGrid {
    let mut values = Vec::with_capacity(raster.width() as usize * raster.height() as usize);
    let mut range: Option<ElevationRange> = None;
    let mut valid_count = 0;

    for pixel in raster.pixels() {
        let [r, g, b, _] = pixel.0;
        let value = terrarium_elevation(r, g, b);
        values.push(value);

        if is_valid_elevation(value) {
            valid_count += 1;
            range = Some(match range {
                Some(current) => ElevationRange {
                    min: current.min.min(value),
                    max: current.max.max(value),
                },
                None => ElevationRange {
                    min: value,
                    max: value,
                },
            });
        }
    }

    ElevationGrid {
        width: raster.width(),
        height: raster.height(),
        values,
        range,
        valid_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_known_values() {
        assert_eq!(terrarium_elevation(128, 0, 0), 0.0);
        assert_eq!(terrarium_elevation(128, 1, 0), 1.0);
        assert_eq!(terrarium_elevation(127, 255, 0), -1.0);
        assert_eq!(terrarium_elevation(128, 0, 128), 0.5);
        // Mont Blanc summit, roughly
        assert_eq!(terrarium_elevation(146, 197, 0), 4805.0);
    }

    #[test]
    fn test_encode_matches_decode() {
        for elevation in [-500.0f32, 0.0, 0.25, 312.0, 1874.5, 8848.0] {
            let [r, g, b] = encode_terrarium(elevation);
            let decoded = terrarium_elevation(r, g, b);
            assert!(
                (decoded - elevation).abs() < 1.0 / 256.0,
                "{} decoded as {}",
                elevation,
                decoded
            );
        }
    }

    #[test]
    fn test_encode_saturates() {
        assert_eq!(encode_terrarium(-40000.0), [0, 0, 0]);
        assert_eq!(encode_terrarium(40000.0), [255, 255, 255]);
    }

    #[test]
    fn test_gap_pixels_are_invalid() {
        let mut raster = RgbaImage::new(2, 1);
        let [r, g, b] = encode_terrarium(1200.0);
        raster.put_pixel(1, 0, Rgba([r, g, b, 255]));

        let grid = decode_terrarium(&raster);

        assert_eq!(grid.get(0, 0), Some(-32768.0));
        assert_eq!(grid.valid_count(), 1);
        assert_eq!(
            grid.range(),
            Some(ElevationRange {
                min: 1200.0,
                max: 1200.0
            })
        );
        assert!(grid.range().unwrap().is_flat());
    }

    #[test]
    fn test_sea_level_and_below_are_invalid() {
        let raster = RgbaImage::from_fn(3, 1, |x, _| {
            let [r, g, b] = encode_terrarium([0.0, -10.0, 0.5][x as usize]);
            Rgba([r, g, b, 255])
        });

        let grid = decode_terrarium(&raster);

        assert_eq!(grid.valid_count(), 1);
        assert_eq!(grid.range().map(|r| r.min), Some(0.5));
    }

    #[test]
    fn test_all_sea_has_no_range() {
        let [r, g, b] = encode_terrarium(0.0);
        let raster = RgbaImage::from_pixel(4, 4, Rgba([r, g, b, 255]));

        let grid = decode_terrarium(&raster);

        assert_eq!(grid.values().len(), 16);
        assert_eq!(grid.valid_count(), 0);
        assert!(grid.range().is_none());
    }

    #[test]
    fn test_range_tracks_min_and_max() {
        let raster = RgbaImage::from_fn(4, 1, |x, _| {
            let [r, g, b] = encode_terrarium([312.0, 900.0, 1874.0, 450.0][x as usize]);
            Rgba([r, g, b, 255])
        });

        let range = decode_terrarium(&raster).range().unwrap();

        assert_eq!(range.min, 312.0);
        assert_eq!(range.max, 1874.0);
        assert_eq!(range.span(), 1562.0);
        assert_eq!(decode_terrarium(&raster).get(4, 0), None);
    }
}
