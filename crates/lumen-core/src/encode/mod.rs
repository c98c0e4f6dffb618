//! Image encoding for Lumen.
//!
//! - JPEG for crop results (`cropped-image.jpg`)
//! - PNG for composite exports (`edited-image.png`)
//!
//! Both encoders take tightly packed RGB rows and validate the buffer before
//! handing it to the `image` crate.

mod jpeg;
mod png;

use thiserror::Error;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use png::{encode_png, PNG_SIGNATURE};

/// Errors that can occur while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}
