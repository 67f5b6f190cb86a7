//! Byte-level flattening of vertically stacked mip strips

pub mod buffer;
pub mod error;
pub mod reshape;

pub use buffer::PixelBuffer;
pub use error::{ReshapeError, Result};
pub use reshape::{plan_steps, reshape};
