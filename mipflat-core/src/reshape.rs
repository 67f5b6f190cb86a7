//! Mip strip flattening.
//!
//! A mip strip stacks every level of a mip chain vertically. Each step splits
//! the buffer into a top and a bottom half and lays the two halves side by
//! side, halving the height and doubling the width, until the image is at
//! least as wide as it is tall.

use log::debug;

use crate::buffer::PixelBuffer;
use crate::error::{ReshapeError, Result};

/// Flatten `buffer` into a near-square layout.
///
/// With `stop_before_last_step` set, the loop ends as soon as the next step
/// would produce the final shape, leaving the image one step short of it.
/// Inputs with `height <= width` are returned untouched.
pub fn reshape(buffer: PixelBuffer, stop_before_last_step: bool) -> Result<PixelBuffer> {
    let (mut width, mut height) = buffer.size();
    if height <= width {
        return Ok(buffer);
    }
    if !height.is_power_of_two() {
        return Err(ReshapeError::HeightNotPowerOfTwo(height));
    }

    let bytes_per_pixel = buffer.bytes_per_pixel();
    let mut source = buffer.into_data();
    let mut destination = vec![0u8; source.len()];
    let mut step = 0usize;

    while height > width {
        let row_stride = source.len() / height;
        interleave_halves(&source, &mut destination, row_stride);
        std::mem::swap(&mut source, &mut destination);

        height /= 2;
        width *= 2;
        step += 1;
        debug!("reshape step {step}: {width}x{height}");

        if stop_before_last_step && is_last_step_next(width, height) {
            debug!("stopping before last step at {width}x{height}");
            break;
        }
    }

    Ok(PixelBuffer::from_parts(width, height, bytes_per_pixel, source))
}

/// Number of steps `reshape` applies to a `width` x `height` image.
///
/// Performs no pixel work and does not check the power-of-two precondition.
pub fn plan_steps(width: usize, height: usize, stop_before_last_step: bool) -> usize {
    let (mut width, mut height) = (width, height);
    let mut steps = 0;
    while height > width {
        height /= 2;
        width *= 2;
        steps += 1;
        if stop_before_last_step && is_last_step_next(width, height) {
            break;
        }
    }
    steps
}

fn is_last_step_next(width: usize, height: usize) -> bool {
    height / 2 <= width * 2
}

/// Row `h` of the top half goes to the left of destination row `h`, row `h`
/// of the bottom half to its right.
fn interleave_halves(source: &[u8], destination: &mut [u8], row_stride: usize) {
    let (top, bottom) = source.split_at(source.len() / 2);
    let rows = destination
        .chunks_exact_mut(row_stride * 2)
        .zip(top.chunks_exact(row_stride))
        .zip(bottom.chunks_exact(row_stride));

    for ((dst_row, top_row), bottom_row) in rows {
        let (left, right) = dst_row.split_at_mut(row_stride);
        left.copy_from_slice(top_row);
        right.copy_from_slice(bottom_row);
    }
}

impl PixelBuffer {
    /// Consume the buffer and return its flattened form. See [`reshape`].
    pub fn reshaped(self, stop_before_last_step: bool) -> Result<Self> {
        reshape(self, stop_before_last_step)
    }
}
