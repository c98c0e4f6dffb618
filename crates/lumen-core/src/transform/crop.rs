//! Crop rectangles in pixel coordinates.
//!
//! A [`CropRect`] is what the crop widget reports on "crop complete": an
//! axis-aligned region measured in source pixels, relative to the top-left
//! corner of the (rotated) image frame.

use serde::{Deserialize, Serialize};

/// Aspect ratio of the crop widget.
pub const DEFAULT_CROP_ASPECT: f64 = 4.0 / 3.0;

/// Axis-aligned crop region in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width × height` frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Largest rectangle with the given aspect ratio centered in a frame.
    ///
    /// This is the area the crop widget reports before the user pans or
    /// zooms. Non-finite or non-positive aspects fall back to
    /// [`DEFAULT_CROP_ASPECT`].
    pub fn centered(frame_width: u32, frame_height: u32, aspect: f64) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            DEFAULT_CROP_ASPECT
        };

        if frame_width == 0 || frame_height == 0 {
            return Self::default();
        }

        let (fw, fh) = (frame_width as f64, frame_height as f64);
        let (width, height) = if fw / fh > aspect {
            (((fh * aspect).round() as u32).clamp(1, frame_width), frame_height)
        } else {
            (frame_width, ((fw / aspect).round() as u32).clamp(1, frame_height))
        };

        Self::new(
            (frame_width - width) / 2,
            (frame_height - height) / 2,
            width,
            height,
        )
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the rectangle lies entirely inside a `width × height` frame.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}
