use thiserror::Error;

/// Precondition violations detected while building or reshaping a pixel buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReshapeError {
    #[error("Zero-sized image: {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("Bytes per pixel must be non-zero")]
    ZeroBytesPerPixel,

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Image size overflows the address space")]
    SizeOverflow,

    #[error("Height {0} is not a power of two")]
    HeightNotPowerOfTwo(usize),
}

pub type Result<T> = std::result::Result<T, ReshapeError>;
