//! Quarter-turn rotation.
//!
//! The editor only rotates in 90° steps, so rotations are exact pixel
//! permutations: no interpolation, no canvas growth beyond swapping width and
//! height. Positive angles are clockwise, matching CSS `rotate()` and
//! `CanvasRenderingContext2D.rotate()` in a y-down coordinate system.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RotationError {
    #[error("Rotation must be a multiple of 90 degrees, got {0}")]
    NotQuarterTurn(i32),
}

/// A rotation in degrees, always a multiple of 90 in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "u16")]
pub struct Rotation(u16);

impl Rotation {
    pub const NONE: Rotation = Rotation(0);
    pub const STEP_DEGREES: u16 = 90;

    /// Normalize any multiple of 90 into `[0, 360)`.
    pub fn from_degrees(degrees: i32) -> Result<Self, RotationError> {
        if degrees % 90 != 0 {
            return Err(RotationError::NotQuarterTurn(degrees));
        }
        Ok(Rotation(degrees.rem_euclid(360) as u16))
    }

    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Advance by 90°, wrapping at 360.
    pub fn next(self) -> Self {
        Rotation((self.0 + Self::STEP_DEGREES) % 360)
    }

    /// Number of clockwise quarter turns (0-3).
    pub fn quarter_turns(self) -> u8 {
        (self.0 / Self::STEP_DEGREES) as u8
    }

    pub fn swaps_dimensions(self) -> bool {
        self.quarter_turns() % 2 == 1
    }

    /// Dimensions of a `width × height` frame after this rotation.
    pub fn rotated_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// CSS class applied to the photo (`rotate-90`).
    pub fn css_class(self) -> String {
        format!("rotate-{}", self.0)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = RotationError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

/// Rotate an image clockwise by a quarter-turn rotation.
pub fn rotate_quarter(image: &DecodedImage, rotation: Rotation) -> DecodedImage {
    if rotation == Rotation::NONE || image.is_empty() {
        return image.clone();
    }

    let Some(rgb) = image.to_rgb_image() else {
        return image.clone();
    };

    let rotated = match rotation.quarter_turns() {
        1 => image::imageops::rotate90(&rgb),
        2 => image::imageops::rotate180(&rgb),
        _ => image::imageops::rotate270(&rgb),
    };

    DecodedImage::from_rgb_image(rotated)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 image with a distinct red value per pixel (row-major 0..6).
    fn numbered(width: u32, height: u32) -> DecodedImage {
        let pixels = (0..width * height)
            .flat_map(|i| [i as u8, 0, 0])
            .collect();
        DecodedImage::new(width, height, pixels)
    }

    fn reds(img: &DecodedImage) -> Vec<u8> {
        img.pixels.chunks_exact(3).map(|p| p[0]).collect()
    }

    #[test]
    fn test_next_wraps() {
        let r = Rotation::NONE.next().next().next();
        assert_eq!(r.degrees(), 270);
        assert_eq!(r.next(), Rotation::NONE);
    }

    #[test]
    fn test_four_rotations_identity() {
        let mut r = Rotation::from_degrees(180).unwrap();
        for _ in 0..4 {
            r = r.next();
        }
        assert_eq!(r.degrees(), 180);
    }

    #[test]
    fn test_from_degrees_normalizes() {
        assert_eq!(Rotation::from_degrees(360).unwrap(), Rotation::NONE);
        assert_eq!(Rotation::from_degrees(-90).unwrap().degrees(), 270);
        assert_eq!(Rotation::from_degrees(450).unwrap().degrees(), 90);
    }

    #[test]
    fn test_from_degrees_rejects_partial_turns() {
        assert_eq!(
            Rotation::from_degrees(45),
            Err(RotationError::NotQuarterTurn(45))
        );
    }

    #[test]
    fn test_css_class() {
        assert_eq!(Rotation::NONE.css_class(), "rotate-0");
        assert_eq!(Rotation::NONE.next().css_class(), "rotate-90");
    }

    #[test]
    fn test_rotated_dimensions() {
        let r90 = Rotation::from_degrees(90).unwrap();
        let r180 = Rotation::from_degrees(180).unwrap();
        assert_eq!(r90.rotated_dimensions(100, 50), (50, 100));
        assert_eq!(r180.rotated_dimensions(100, 50), (100, 50));
    }

    #[test]
    fn test_rotate_90_clockwise() {
        // 0 1 2        3 0
        // 3 4 5   ->   4 1
        //              5 2
        let img = numbered(3, 2);
        let out = rotate_quarter(&img, Rotation::from_degrees(90).unwrap());
        assert_eq!(out.dimensions(), (2, 3));
        assert_eq!(reds(&out), vec![3, 0, 4, 1, 5, 2]);
    }

    #[test]
    fn test_rotate_180() {
        let img = numbered(3, 2);
        let out = rotate_quarter(&img, Rotation::from_degrees(180).unwrap());
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(reds(&out), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_rotate_270() {
        // 0 1 2        2 5
        // 3 4 5   ->   1 4
        //              0 3
        let img = numbered(3, 2);
        let out = rotate_quarter(&img, Rotation::from_degrees(270).unwrap());
        assert_eq!(reds(&out), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_rotate_none_is_copy() {
        let img = numbered(4, 3);
        assert_eq!(rotate_quarter(&img, Rotation::NONE), img);
    }
}
