use std::io::Write;

use image::{codecs::png::PngEncoder, ExtendedColorType, GrayImage, ImageEncoder, ImageResult};

use crate::encoder::{BitMatrix, DARK, LIGHT};

// Generated image
//------------------------------------------------------------------------------

/// The most recently generated QR code: a black-on-white raster plus the module
/// matrix and quiet zone it was drawn with.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    raster: GrayImage,
    matrix: BitMatrix,
    quiet_zone: u32,
}

impl GeneratedImage {
    pub(crate) fn new(raster: GrayImage, matrix: BitMatrix, quiet_zone: u32) -> Self {
        debug_assert!(
            raster.pixels().all(|p| *p == DARK || *p == LIGHT),
            "Generated raster must only contain pure black and white pixels"
        );
        Self { raster, matrix, quiet_zone }
    }

    pub fn raster(&self) -> &GrayImage {
        &self.raster
    }

    pub fn modules(&self) -> &BitMatrix {
        &self.matrix
    }

    /// Light border around the symbol, in modules.
    pub fn quiet_zone(&self) -> u32 {
        self.quiet_zone
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.raster.dimensions()
    }

    pub fn is_two_tone(&self) -> bool {
        self.raster.pixels().all(|p| *p == DARK || *p == LIGHT)
    }

    /// Writes the raster as an 8-bit grayscale PNG.
    pub fn write_png<W: Write>(&self, writer: W) -> ImageResult<()> {
        let (w, h) = self.raster.dimensions();
        PngEncoder::new(writer).write_image(self.raster.as_raw(), w, h, ExtendedColorType::L8)
    }

    #[cfg(test)]
    fn to_png_bytes(&self) -> ImageResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_png(&mut buf)?;
        Ok(buf)
    }

    /// Pixel equality against a decoded raster, e.g. a file read back from disk.
    pub fn same_pixels(&self, other: &GrayImage) -> bool {
        self.raster.dimensions() == other.dimensions() && self.raster.as_raw() == other.as_raw()
    }
}
