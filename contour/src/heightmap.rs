//! Grayscale heightmap images.

use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

/// Errors reading or writing heightmap images.
#[derive(Debug, Error)]
pub enum HeightmapError {
    /// Bytes were not a readable image
    #[error("failed to decode heightmap image: {0}")]
    Decode(String),

    /// Image has a zero dimension
    #[error("heightmap image is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("failed to encode heightmap: {0}")]
    Encode(String),
}

/// Heightmap image whose red channel carries the height (0 = lowest, 255 =
/// highest). Heightmaps built by the DEM pipeline are gray; heightmaps from
/// other providers may use any RGB layout as long as red holds the height.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap(RgbaImage);

impl Heightmap {
    /// Wraps an existing raster.
    pub fn from_raster(raster: RgbaImage) -> Self {
        Self(raster)
    }

    /// Decodes PNG/JPEG bytes from an external heightmap provider.
    pub fn decode(bytes: &[u8]) -> Result<Self, HeightmapError> {
        let raster = image::load_from_memory(bytes)
            .map_err(|e| HeightmapError::Decode(e.to_string()))?
            .to_rgba8();

        if raster.width() == 0 || raster.height() == 0 {
            return Err(HeightmapError::Empty {
                width: raster.width(),
                height: raster.height(),
            });
        }

        Ok(Self(raster))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.0
    }

    /// Gray value at `(x, y)`, clamped to the image.
    #[inline]
    pub fn value_at(&self, x: u32, y: u32) -> u8 {
        let x = x.min(self.width().saturating_sub(1));
        let y = y.min(self.height().saturating_sub(1));
        self.0.get_pixel_checked(x, y).map_or(0, |pixel| pixel[0])
    }

    /// Encodes as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, HeightmapError> {
        let mut buffer = Vec::new();
        self.0
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| HeightmapError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}
