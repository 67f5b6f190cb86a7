use std::io::Cursor;

use image::{ColorType, GenericImageView, ImageFormat};
use mipflat_core::PixelBuffer;

use crate::error::{IoError, Result};

/// Decoded pixels together with the layout needed to encode them again
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pixels: PixelBuffer,
    color: ColorType,
}

impl DecodedImage {
    /// Pair `pixels` with `color`. The buffer's bytes per pixel must match
    /// the color type.
    pub fn new(pixels: PixelBuffer, color: ColorType) -> Result<Self> {
        let expected = usize::from(color.bytes_per_pixel());
        if pixels.bytes_per_pixel() != expected {
            return Err(IoError::PixelLayout {
                color,
                expected,
                actual: pixels.bytes_per_pixel(),
            });
        }
        Ok(Self { pixels, color })
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn color(&self) -> ColorType {
        self.color
    }

    /// Split into the pixel buffer and its color type
    pub fn into_parts(self) -> (PixelBuffer, ColorType) {
        (self.pixels, self.color)
    }
}

/// Conversion between encoded image files and raw pixel buffers
pub trait ImageCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;

    fn encode(&self, image: &DecodedImage) -> Result<Vec<u8>>;

    /// Format produced by `encode`
    fn output_format(&self) -> ImageFormat;
}

/// Codec backed by the `image` crate.
///
/// Decoding sniffs the format from the file contents. Encoding always
/// produces `output_format`.
#[derive(Debug, Clone, Copy)]
pub struct ImageRsCodec {
    output_format: ImageFormat,
}

impl ImageRsCodec {
    pub fn new(output_format: ImageFormat) -> Self {
        Self { output_format }
    }
}

impl Default for ImageRsCodec {
    fn default() -> Self {
        Self::new(ImageFormat::Png)
    }
}

impl ImageCodec for ImageRsCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let dynamic =
            image::load_from_memory(bytes).map_err(|e| IoError::Decode(e.to_string()))?;
        let color = dynamic.color();
        let (width, height) = dynamic.dimensions();
        decoded_from_raw(width, height, color, dynamic.into_bytes())
    }

    fn encode(&self, decoded: &DecodedImage) -> Result<Vec<u8>> {
        let (width, height) = decoded.pixels.size();
        let too_large = || IoError::DimensionsTooLarge { width, height };
        let w = u32::try_from(width).map_err(|_| too_large())?;
        let h = u32::try_from(height).map_err(|_| too_large())?;

        let mut out = Cursor::new(Vec::new());
        image::write_buffer_with_format(
            &mut out,
            decoded.pixels.data(),
            w,
            h,
            decoded.color,
            self.output_format,
        )
        .map_err(|e| IoError::Encode(e.to_string()))?;

        Ok(out.into_inner())
    }

    fn output_format(&self) -> ImageFormat {
        self.output_format
    }
}

/// Layout problems in freshly decoded pixels are the input file's fault
fn decoded_from_raw(
    width: u32,
    height: u32,
    color: ColorType,
    bytes: Vec<u8>,
) -> Result<DecodedImage> {
    let pixels = PixelBuffer::new(
        width as usize,
        height as usize,
        usize::from(color.bytes_per_pixel()),
        bytes,
    )
    .map_err(|e| IoError::Decode(e.to_string()))?;
    DecodedImage::new(pixels, color).map_err(|e| IoError::Decode(e.to_string()))
}
