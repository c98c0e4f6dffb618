//! Filter preset WASM bindings.
//!
//! Presets are addressed by their class tag (`style1`..`style7`); an empty
//! tag means no filter.
//!
//! ```typescript
//! import { apply_filter, css_filter } from '@lumen/wasm';
//!
//! img.style.filter = css_filter('style1'); // "sepia(100%)"
//! const sepia = apply_filter(image, 'style1');
//! ```

use crate::types::JsDecodedImage;
use lumen_core::filter::{self, FilterStyle};
use wasm_bindgen::prelude::*;

fn parse_style(tag: &str) -> Result<FilterStyle, JsValue> {
    tag.parse::<FilterStyle>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Apply a filter preset, returning a new image.
///
/// The result matches what the browser paints for the same preset's CSS
/// `filter` value.
#[wasm_bindgen]
pub fn apply_filter(image: &JsDecodedImage, tag: &str) -> Result<JsDecodedImage, JsValue> {
    let style = parse_style(tag)?;
    let mut decoded = image.to_decoded()?;
    filter::apply_filter(&mut decoded, style);
    Ok(JsDecodedImage::from_decoded(decoded))
}

/// CSS `filter` property value for a preset tag.
#[wasm_bindgen]
pub fn css_filter(tag: &str) -> Result<String, JsValue> {
    parse_style(tag).map(|style| style.css_filter().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_filter_known_tags() {
        assert_eq!(css_filter("style1").unwrap(), "sepia(100%)");
        assert_eq!(css_filter("style7").unwrap(), "hue-rotate(90deg)");
        assert_eq!(css_filter("").unwrap(), "none");
    }

    #[test]
    fn test_apply_filter_grayscale() {
        let image = JsDecodedImage::new(1, 1, vec![255, 0, 0]);
        let gray = apply_filter(&image, "style2").unwrap();
        let px = gray.pixels();
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn test_apply_filter_leaves_input() {
        let image = JsDecodedImage::new(1, 1, vec![10, 20, 30]);
        let _ = apply_filter(&image, "style5").unwrap();
        assert_eq!(image.pixels(), vec![10, 20, 30]);
    }
}
