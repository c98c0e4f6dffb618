//! Rotation and crop WASM bindings.
//!
//! # Functions
//!
//! - [`rotate_image`] - Rotate a decoded image clockwise by a multiple of 90°
//! - [`crop_image`] - Run the safe-area crop on encoded bytes and get JPEG back
//!
//! # Example
//!
//! ```typescript
//! import { rotate_image, crop_image } from '@lumen/wasm';
//!
//! const rotated = rotate_image(image, 90);
//!
//! // Crop rectangle is relative to the top-left of the rotated photo
//! const jpeg = crop_image(sourceBytes, 0, 0, 400, 300, 90, 92);
//! const blob = new Blob([jpeg], { type: 'image/jpeg' });
//! ```

use crate::types::JsDecodedImage;
use lumen_core::crop::get_cropped_image;
use lumen_core::transform::{rotate_quarter, CropRect, Rotation};
use wasm_bindgen::prelude::*;

fn parse_rotation(degrees: i32) -> Result<Rotation, JsValue> {
    Rotation::from_degrees(degrees).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rotate an image clockwise.
///
/// # Arguments
///
/// * `image` - The source image
/// * `degrees` - Any multiple of 90, negative values rotate counter-clockwise
///
/// # Errors
///
/// Returns an error if `degrees` is not a multiple of 90.
#[wasm_bindgen]
pub fn rotate_image(image: &JsDecodedImage, degrees: i32) -> Result<JsDecodedImage, JsValue> {
    let rotation = parse_rotation(degrees)?;
    let decoded = image.to_decoded()?;
    Ok(JsDecodedImage::from_decoded(rotate_quarter(
        &decoded, rotation,
    )))
}

/// Crop encoded image bytes and return the result as JPEG.
///
/// The source is drawn rotated on a square safe area and the rectangle is
/// read back relative to the rotated photo's top-left corner. Areas outside
/// the photo come out black.
///
/// # Arguments
///
/// * `source` - Encoded JPEG or PNG bytes
/// * `x`, `y`, `width`, `height` - Crop rectangle in pixels
/// * `degrees` - Rotation, a multiple of 90
/// * `quality` - JPEG quality (1-100)
///
/// # Errors
///
/// Returns an error if the source can't be decoded, the rotation is not a
/// quarter turn, or the rectangle has zero area ("Canvas is empty") or is
/// larger than a canvas can be.
#[wasm_bindgen]
pub fn crop_image(
    source: &[u8],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    degrees: i32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    let rotation = parse_rotation(degrees)?;
    get_cropped_image(source, CropRect::new(x, y, width, height), rotation, quality)
        .map(|blob| blob.into_bytes())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
