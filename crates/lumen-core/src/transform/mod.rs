//! Image transformation operations: quarter-turn rotation and cropping.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise, multiples of 90
//! - Crop rectangles are in pixels, relative to the rotated image frame
//! - Origin is top-left corner

mod canvas;
mod crop;
mod rotation;

pub use canvas::{Canvas, ImageData, SafeArea};
pub use crop::{CropRect, DEFAULT_CROP_ASPECT};
pub use rotation::{rotate_quarter, Rotation, RotationError};
