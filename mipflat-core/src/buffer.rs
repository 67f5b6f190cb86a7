use crate::error::{ReshapeError, Result};

/// Raw raster with row-major, unpadded pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap `data` as a `width` x `height` raster.
    ///
    /// Fails if any dimension is zero or if `data.len()` differs from
    /// `width * height * bytes_per_pixel`.
    pub fn new(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ReshapeError::ZeroDimension { width, height });
        }
        if bytes_per_pixel == 0 {
            return Err(ReshapeError::ZeroBytesPerPixel);
        }

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(bytes_per_pixel))
            .ok_or(ReshapeError::SizeOverflow)?;

        if data.len() != expected {
            return Err(ReshapeError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            data,
        })
    }

    /// Get width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get dimensions (width, height)
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Bytes spanned by one row
    pub fn bytes_per_row(&self) -> usize {
        self.data.len() / self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of row `y`, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.bytes_per_row();
        Some(&self.data[y * stride..(y + 1) * stride])
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Swap in a new shape over `data`. Callers must keep the byte length
    /// equal to `width * height * bytes_per_pixel`.
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height * bytes_per_pixel);
        Self {
            width,
            height,
            bytes_per_pixel,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let buf = PixelBuffer::new(2, 3, 4, vec![0; 24]).unwrap();
        assert_eq!(buf.size(), (2, 3));
        assert_eq!(buf.bytes_per_pixel(), 4);
        assert_eq!(buf.bytes_per_row(), 8);
        assert_eq!(buf.data().len(), 24);
    }

    #[test]
    fn test_new_zero_dimension() {
        let result = PixelBuffer::new(0, 4, 1, vec![]);
        assert_eq!(
            result.unwrap_err(),
            ReshapeError::ZeroDimension { width: 0, height: 4 }
        );

        let result = PixelBuffer::new(4, 0, 1, vec![]);
        assert!(matches!(result, Err(ReshapeError::ZeroDimension { .. })));
    }

    #[test]
    fn test_new_zero_bytes_per_pixel() {
        let result = PixelBuffer::new(1, 1, 0, vec![]);
        assert_eq!(result.unwrap_err(), ReshapeError::ZeroBytesPerPixel);
    }

    #[test]
    fn test_new_size_mismatch() {
        let result = PixelBuffer::new(2, 2, 3, vec![0; 11]);
        assert_eq!(
            result.unwrap_err(),
            ReshapeError::SizeMismatch {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_new_overflow() {
        let result = PixelBuffer::new(usize::MAX, 2, 1, vec![]);
        assert_eq!(result.unwrap_err(), ReshapeError::SizeOverflow);
    }

    #[test]
    fn test_row_access() {
        let buf = PixelBuffer::new(2, 2, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(buf.row(0), Some(&[1u8, 2][..]));
        assert_eq!(buf.row(1), Some(&[3u8, 4][..]));
        assert_eq!(buf.row(2), None);
    }
}
