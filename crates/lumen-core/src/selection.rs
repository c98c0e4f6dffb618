//! Interactive crop selection.
//!
//! The crop widget shows the rotated photo with a fixed-aspect selection on
//! top. Dragging pans the selection and zooming shrinks or grows it about
//! its center. All coordinates are pixels of the rotated frame, so
//! [`CropSelection::rect`] can be reported to the editor as is.
//!
//! The selection never leaves the frame, never grows past the default
//! (largest centered) rectangle and never shrinks below
//! [`MIN_SELECTION_PX`] wide.

use crate::transform::CropRect;

/// Smallest selection width, in frame pixels.
pub const MIN_SELECTION_PX: u32 = 16;

/// Zoom factor applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSelection {
    frame_width: u32,
    frame_height: u32,
    aspect: f64,
    rect: CropRect,
}

impl CropSelection {
    /// Start with the largest centered rectangle of `aspect`.
    pub fn new(frame_width: u32, frame_height: u32, aspect: f64) -> Self {
        Self {
            frame_width,
            frame_height,
            aspect,
            rect: CropRect::centered(frame_width, frame_height, aspect),
        }
    }

    /// Resume from a previously reported rectangle when it still fits the
    /// frame, otherwise start fresh.
    pub fn resume(
        frame_width: u32,
        frame_height: u32,
        aspect: f64,
        rect: Option<CropRect>,
    ) -> Self {
        let mut selection = Self::new(frame_width, frame_height, aspect);
        if let Some(rect) = rect {
            if !rect.is_empty() && rect.fits_within(frame_width, frame_height) {
                selection.rect = rect;
            }
        }
        selection
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn frame(&self) -> (u32, u32) {
        (self.frame_width, self.frame_height)
    }

    /// Place the selection at `start` moved by `(dx, dy)` frame pixels,
    /// clamped to the frame. `start` is where the drag began.
    pub fn pan_from(&mut self, start: CropRect, dx: f64, dy: f64) {
        if self.rect.is_empty() {
            return;
        }
        self.rect.x = clamp_offset(start.x as f64 + dx, self.frame_width, self.rect.width);
        self.rect.y = clamp_offset(start.y as f64 + dy, self.frame_height, self.rect.height);
    }

    /// Zoom by `factor` about the selection center. Factors above 1 zoom in
    /// (the selection shrinks).
    pub fn zoom(&mut self, factor: f64) {
        if self.rect.is_empty() || !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let max = CropRect::centered(self.frame_width, self.frame_height, self.aspect);
        let min_width = MIN_SELECTION_PX.min(max.width);

        let width = ((self.rect.width as f64 / factor).round() as u32).clamp(min_width, max.width);
        let height = if width == max.width {
            max.height
        } else {
            ((width as f64 / self.aspect).round() as u32).clamp(1, max.height)
        };

        let cx = self.rect.x as f64 + self.rect.width as f64 / 2.0;
        let cy = self.rect.y as f64 + self.rect.height as f64 / 2.0;
        self.rect = CropRect::new(
            clamp_offset(cx - width as f64 / 2.0, self.frame_width, width),
            clamp_offset(cy - height as f64 / 2.0, self.frame_height, height),
            width,
            height,
        );
    }
}

fn clamp_offset(offset: f64, frame: u32, size: u32) -> u32 {
    let max = frame.saturating_sub(size) as f64;
    offset.round().clamp(0.0, max) as u32
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Gesture {
        Pan(f64, f64),
        Zoom(f64),
    }

    fn gesture() -> impl Strategy<Value = Gesture> {
        prop_oneof![
            (-2000.0f64..2000.0, -2000.0f64..2000.0).prop_map(|(dx, dy)| Gesture::Pan(dx, dy)),
            (0.25f64..4.0).prop_map(Gesture::Zoom),
        ]
    }

    proptest! {
        #[test]
        fn prop_selection_stays_in_frame(
            w in 20u32..=1500,
            h in 20u32..=1500,
            gestures in proptest::collection::vec(gesture(), 0..30),
        ) {
            let mut selection = CropSelection::new(w, h, 4.0 / 3.0);
            for g in gestures {
                match g {
                    Gesture::Pan(dx, dy) => selection.pan_from(selection.rect(), dx, dy),
                    Gesture::Zoom(f) => selection.zoom(f),
                }
                let rect = selection.rect();
                prop_assert!(rect.fits_within(w, h));
                prop_assert!(!rect.is_empty());
            }
        }
    }
}
