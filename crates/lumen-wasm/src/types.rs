//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Lumen types,
//! handling the conversion between Rust and JavaScript data representations.

use lumen_core::decode::DecodedImage;
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// Pixels are RGB, 3 bytes per pixel, row-major. Calling `pixels()` copies
/// them out of WASM memory into a `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB pixel data.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup otherwise.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage (clones the pixels).
    ///
    /// Images built from JavaScript may carry a buffer of the wrong length;
    /// those are rejected here before reaching the core.
    pub(crate) fn to_decoded(&self) -> Result<DecodedImage, JsValue> {
        let expected = self.width as usize * self.height as usize * 3;
        if self.pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Invalid pixel data: expected {expected} bytes, got {}",
                self.pixels.len()
            )));
        }
        Ok(DecodedImage::new(self.width, self.height, self.pixels.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_creation() {
        let img = JsDecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_from_decoded() {
        let decoded = DecodedImage::new(4, 2, vec![7u8; 4 * 2 * 3]);
        let js_img = JsDecodedImage::from_decoded(decoded);
        assert_eq!((js_img.width(), js_img.height()), (4, 2));
        assert_eq!(js_img.pixels(), vec![7u8; 24]);
    }

    #[test]
    fn test_to_decoded_round_trip() {
        let pixels: Vec<u8> = (0..18).collect();
        let js_img = JsDecodedImage::new(3, 2, pixels.clone());
        let decoded = js_img.to_decoded().unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.pixels, pixels);
    }
}
