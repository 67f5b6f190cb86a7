use std::path::PathBuf;

use image::ColorType;
use mipflat_core::ReshapeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list directory {}: {source}", path.display())]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Image encode error: {0}")]
    Encode(String),

    #[error("{color:?} needs {expected} bytes per pixel, buffer has {actual}")]
    PixelLayout {
        color: ColorType,
        expected: usize,
        actual: usize,
    },

    #[error("Path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    #[error("Image dimensions {width}x{height} are too large")]
    DimensionsTooLarge { width: usize, height: usize },

    #[error("Reshape error: {0}")]
    Reshape(#[from] ReshapeError),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, IoError>;
