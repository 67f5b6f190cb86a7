//! File-level glue around the reshape engine: image codecs and the
//! directory pipeline

pub mod codec;
pub mod error;
pub mod pipeline;

pub use codec::{DecodedImage, ImageCodec, ImageRsCodec};
pub use error::{IoError, Result};
pub use pipeline::{FileFailure, FileOutcome, Pipeline, PipelineConfig, PipelineReport};

// Re-export from mipflat-core for convenience
pub use mipflat_core::{PixelBuffer, ReshapeError};
