//! Editor configuration.
//!
//! Every field has a default, so hosts can pass a partial object (or none at
//! all). From JavaScript the object is converted with `serde-wasm-bindgen`.

use serde::{Deserialize, Serialize};

use crate::encode::DEFAULT_JPEG_QUALITY;
use crate::transform::DEFAULT_CROP_ASPECT;

pub const DEFAULT_SOURCE_URL: &str = "/assets/yousuf.jpg";
pub const DEFAULT_CROPPED_FILE_NAME: &str = "cropped-image.jpg";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "edited-image.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// The static photo being edited.
    pub source_url: String,
    /// JPEG quality for crop results (1-100).
    pub jpeg_quality: u8,
    /// Width / height ratio of the crop widget.
    pub crop_aspect: f64,
    /// Download name for crop results.
    pub cropped_file_name: String,
    /// Download name for composite exports.
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            crop_aspect: DEFAULT_CROP_ASPECT,
            cropped_file_name: DEFAULT_CROPPED_FILE_NAME.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl EditorConfig {
    /// Clamp out-of-range values back into their valid ranges.
    pub fn normalized(mut self) -> Self {
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        if !(self.crop_aspect.is_finite() && self.crop_aspect > 0.0) {
            self.crop_aspect = DEFAULT_CROP_ASPECT;
        }
        if self.cropped_file_name.is_empty() {
            self.cropped_file_name = DEFAULT_CROPPED_FILE_NAME.to_string();
        }
        if self.export_file_name.is_empty() {
            self.export_file_name = DEFAULT_EXPORT_FILE_NAME.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.source_url, "/assets/yousuf.jpg");
        assert_eq!(config.jpeg_quality, 92);
        assert!((config.crop_aspect - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(config.cropped_file_name, "cropped-image.jpg");
        assert_eq!(config.export_file_name, "edited-image.png");
    }

    #[test]
    fn test_normalized_clamps() {
        let mut config = EditorConfig::default();
        config.jpeg_quality = 0;
        config.crop_aspect = -1.0;
        config.export_file_name.clear();

        let config = config.normalized();
        assert_eq!(config.jpeg_quality, 1);
        assert!((config.crop_aspect - DEFAULT_CROP_ASPECT).abs() < 1e-12);
        assert_eq!(config.export_file_name, DEFAULT_EXPORT_FILE_NAME);
    }

    #[test]
    fn test_normalized_keeps_valid_values() {
        let mut config = EditorConfig::default();
        config.jpeg_quality = 75;
        config.crop_aspect = 1.0;
        assert_eq!(config.clone().normalized(), config);
    }
}
