//! Image encoding WASM bindings.
//!
//! - [`encode_jpeg`] - RGB pixels to JPEG bytes (the crop output format)
//! - [`encode_png`] - RGB pixels to PNG bytes (the export output format)

use lumen_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100); the editor uses 92
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 3
/// - Width or height is zero
/// - Encoding fails internally
///
/// # Example
///
/// ```typescript
/// const pixels = new Uint8Array(100 * 100 * 3).fill(128);
/// const jpeg = encode_jpeg(pixels, 100, 100, 92);
/// ```
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGB pixel data to PNG bytes.
///
/// Fails under the same conditions as [`encode_jpeg`].
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::encode::PNG_SIGNATURE;

    #[test]
    fn test_encode_jpeg_magic() {
        let jpeg = encode_jpeg(&vec![128u8; 10 * 10 * 3], 10, 10, 92).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&vec![0u8; 4 * 4 * 3], 4, 4).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_dimensions() {
        assert!(encode_jpeg(&[128u8; 100], 0, 100, 92).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_pixel_data() {
        let pixels = vec![128u8; 50 * 50 * 3];
        assert!(encode_png(&pixels, 100, 100).is_err());
    }
}
