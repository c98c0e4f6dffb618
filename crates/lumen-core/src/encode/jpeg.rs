//! JPEG encoding for crop results.
//!
//! Mirrors what `canvas.toBlob(cb, "image/jpeg")` produces: a baseline JPEG
//! at a fixed quality. The browser default quality is 0.92, see
//! [`DEFAULT_JPEG_QUALITY`].

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate_rgb, EncodeError};

/// Quality used when the configuration does not override it.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Errors
///
/// `InvalidDimensions` for a zero-area image, `InvalidPixelData` when the
/// buffer length does not match, `EncodingFailed` if the encoder errors.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
