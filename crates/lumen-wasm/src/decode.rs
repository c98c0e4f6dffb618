//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@lumen/wasm';
//!
//! const bytes = new Uint8Array(await (await fetch('/assets/yousuf.jpg')).arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use lumen_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes.
///
/// EXIF orientation is applied, so the result has the dimensions the browser
/// shows for the same source in an `<img>`.
///
/// # Errors
///
/// Returns an error if the bytes are empty, not a supported format, or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::encode::encode_png;

    #[test]
    fn test_decode_image_png() {
        let png = encode_png(&[10, 20, 30, 40, 50, 60], 2, 1).unwrap();
        let img = decode_image(&png).unwrap();
        assert_eq!((img.width(), img.height()), (2, 1));
        assert_eq!(img.pixels(), vec![10, 20, 30, 40, 50, 60]);
    }
}
