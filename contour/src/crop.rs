//! Geographic crop and resample of a heightmap raster.
//!
//! The crop rectangle is derived linearly in both longitude and latitude from
//! the mosaic's extent. Web Mercator is not linear in latitude, so tall crops
//! drift slightly; over the few tiles of a DEM request the error stays well
//! under a pixel at the default output size.

use crate::coord::{GeoBounds, MosaicExtent};
use image::{Rgba, RgbaImage};
use std::fmt;
use std::str::FromStr;

/// Pixel filter used by [`resample`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResampleFilter {
    /// Nearest source pixel
    Nearest,
    /// Alpha-weighted blend of the four nearest source pixels
    #[default]
    Bilinear,
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleFilter::Nearest => write!(f, "nearest"),
            ResampleFilter::Bilinear => write!(f, "bilinear"),
        }
    }
}

impl FromStr for ResampleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ResampleFilter::Nearest),
            "bilinear" | "linear" => Ok(ResampleFilter::Bilinear),
            other => Err(format!("unknown resample filter '{}'", other)),
        }
    }
}

/// Source rectangle in mosaic pixel space. May be fractional and may extend
/// past the raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Rectangle covering the whole raster.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Maps `bounds` into the pixel space of a `mosaic_width` × `mosaic_height`
    /// raster covering `extent`.
    pub fn from_bounds(
        extent: &MosaicExtent,
        bounds: &GeoBounds,
        mosaic_width: u32,
        mosaic_height: u32,
    ) -> Self {
        let lon_span = extent.east - extent.west;
        let lat_span = extent.north - extent.south;
        let w = mosaic_width as f64;
        let h = mosaic_height as f64;

        Self {
            x: (bounds.west() - extent.west) / lon_span * w,
            y: (extent.north - bounds.north()) / lat_span * h,
            width: bounds.width_degrees() / lon_span * w,
            height: bounds.height_degrees() / lat_span * h,
        }
    }
}

/// Resamples `rect` of `raster` into an `out_width` × `out_height` image.
///
/// Output pixel centers are mapped into the rectangle; every source read is
/// clamped to the raster. Output of an empty raster is all gap.
pub fn resample(
    raster: &RgbaImage,
    rect: &CropRect,
    out_width: u32,
    out_height: u32,
    filter: ResampleFilter,
) -> RgbaImage {
    if raster.width() == 0 || raster.height() == 0 {
        return RgbaImage::new(out_width, out_height);
    }

    let scale_x = rect.width / out_width as f64;
    let scale_y = rect.height / out_height as f64;

    RgbaImage::from_fn(out_width, out_height, |ox, oy| {
        let sx = rect.x + (ox as f64 + 0.5) * scale_x;
        let sy = rect.y + (oy as f64 + 0.5) * scale_y;
        match filter {
            ResampleFilter::Nearest => sample_nearest(raster, sx, sy),
            ResampleFilter::Bilinear => sample_bilinear(raster, sx, sy),
        }
    })
}

fn clamp_index(value: f64, len: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        (value as u32).min(len - 1)
    }
}

fn sample_nearest(raster: &RgbaImage, sx: f64, sy: f64) -> Rgba<u8> {
    let x = clamp_index(sx.floor(), raster.width());
    let y = clamp_index(sy.floor(), raster.height());
    *raster.get_pixel(x, y)
}

/// Bilinear sample at a continuous position.
///
/// Color channels are weighted by alpha, so transparent pixels only reduce
/// the output alpha and never darken their neighbours.
fn sample_bilinear(raster: &RgbaImage, sx: f64, sy: f64) -> Rgba<u8> {
    let px = sx - 0.5;
    let py = sy - 0.5;
    let fx = px - px.floor();
    let fy = py - py.floor();

    let x0 = clamp_index(px.floor(), raster.width());
    let y0 = clamp_index(py.floor(), raster.height());
    let x1 = clamp_index(px.floor() + 1.0, raster.width());
    let y1 = clamp_index(py.floor() + 1.0, raster.height());

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x1, y0, fx * (1.0 - fy)),
        (x0, y1, (1.0 - fx) * fy),
        (x1, y1, fx * fy),
    ];

    let mut color = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (x, y, weight) in taps {
        let [r, g, b, a] = raster.get_pixel(x, y).0;
        let coverage = weight * a as f64;
        for (channel, value) in color.iter_mut().zip([r, g, b]) {
            *channel += coverage * value as f64;
        }
        alpha += coverage;
    }

    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let [r, g, b] = color.map(|sum| (sum / alpha).round().clamp(0.0, 255.0) as u8);
    Rgba([r, g, b, alpha.round().clamp(0.0, 255.0) as u8])
}
