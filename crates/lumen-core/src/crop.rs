//! The crop pipeline: rotate, extract, encode.
//!
//! 1. Decode the source (terminal [`CropError::LoadFailed`] on failure).
//! 2. Draw it rotated about the center of a square safe area twice the size
//!    of its larger dimension, so no corner is clipped.
//! 3. Read back the requested rectangle, measured from the top-left of the
//!    rotated image.
//! 4. Resize the working canvas to exactly the rectangle and write the
//!    extracted pixels back.
//! 5. Encode as JPEG; a zero-area canvas is [`CropError::CanvasEmpty`].
//!
//! Rectangles larger than [`MAX_CANVAS_AREA`] pixels are refused before any
//! allocation with [`CropError::TooLarge`], where a browser would fail to
//! create the canvas.
//!
//! Each crop works from the original source, never from a previous result.

use thiserror::Error;

use crate::blob::ImageBlob;
use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode_jpeg, EncodeError};
use crate::transform::{Canvas, CropRect, Rotation, SafeArea};

/// Largest canvas the crop will allocate, in pixels (16384 × 16384).
pub const MAX_CANVAS_AREA: u64 = 16_384 * 16_384;

#[derive(Debug, Error)]
pub enum CropError {
    #[error("Failed to load image: {0}")]
    LoadFailed(#[from] DecodeError),

    #[error("Canvas is empty")]
    CanvasEmpty,

    #[error("Crop area {width}x{height} exceeds the canvas limit")]
    TooLarge { width: u32, height: u32 },

    #[error("Failed to encode cropped image: {0}")]
    EncodeFailed(EncodeError),
}

impl From<EncodeError> for CropError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::InvalidDimensions { .. } => CropError::CanvasEmpty,
            other => CropError::EncodeFailed(other),
        }
    }
}

/// Render the crop of an already decoded image onto a canvas of exactly
/// `rect.width × rect.height`.
pub fn render_crop(
    image: &DecodedImage,
    rect: CropRect,
    rotation: Rotation,
) -> Result<Canvas, CropError> {
    check_area(rect)?;

    let area = SafeArea::new(image, rotation);
    let (ox, oy) = area.image_origin();
    let (frame_width, frame_height) = area.image_dimensions();
    log::trace!(
        "{frame_width}x{frame_height} frame at ({ox}, {oy}) on a {}px safe area",
        area.side()
    );
    let data = area.get_image_data(
        ox + rect.x as i64,
        oy + rect.y as i64,
        rect.width,
        rect.height,
    );

    let mut canvas = Canvas::new(0, 0);
    canvas.set_size(rect.width, rect.height);
    canvas.put_image_data(&data, 0, 0);
    Ok(canvas)
}

fn check_area(rect: CropRect) -> Result<(), CropError> {
    if rect.area() > MAX_CANVAS_AREA {
        return Err(CropError::TooLarge {
            width: rect.width,
            height: rect.height,
        });
    }
    Ok(())
}

/// Crop encoded source bytes and return the result as a JPEG blob.
pub fn get_cropped_image(
    source: &[u8],
    rect: CropRect,
    rotation: Rotation,
    quality: u8,
) -> Result<ImageBlob, CropError> {
    check_area(rect)?;
    let image = decode_image(source)?;

    let canvas = render_crop(&image, rect, rotation)?;
    if canvas.is_empty() {
        return Err(CropError::CanvasEmpty);
    }

    let flat = canvas.flatten();
    let bytes = encode_jpeg(&flat.pixels, flat.width, flat.height, quality)?;
    log::debug!(
        "cropped {}x{} at ({}, {}) rotated {} into {} bytes",
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        rotation,
        bytes.len()
    );
    Ok(ImageBlob::jpeg(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::ImageFormat;
    use crate::encode::encode_png;

    /// Image where each pixel encodes its own coordinates.
    fn coords(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 200]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn png_source(width: u32, height: u32) -> Vec<u8> {
        let img = coords(width, height);
        encode_png(&img.pixels, width, height).unwrap()
    }

    #[test]
    fn test_full_bounds_at_zero_is_identical() {
        let img = coords(100, 100);
        let canvas = render_crop(&img, CropRect::full(100, 100), Rotation::NONE).unwrap();
        assert_eq!(canvas.flatten(), img);
    }

    #[test]
    fn test_full_bounds_odd_dimensions() {
        let img = coords(7, 3);
        let canvas = render_crop(&img, CropRect::full(7, 3), Rotation::NONE).unwrap();
        assert_eq!(canvas.flatten(), img);
    }

    #[test]
    fn test_offset_region() {
        let img = coords(20, 10);
        let out = render_crop(&img, CropRect::new(5, 2, 4, 3), Rotation::NONE).unwrap().flatten();

        assert_eq!(out.dimensions(), (4, 3));
        assert_eq!(out.pixel(0, 0), Some([5, 2, 200]));
        assert_eq!(out.pixel(3, 2), Some([8, 4, 200]));
    }

    #[test]
    fn test_rotated_frame_coordinates() {
        // 20x10 rotated 90° clockwise becomes 10x20; its top-left pixel is
        // the source's bottom-left.
        let img = coords(20, 10);
        let rotation = Rotation::from_degrees(90).unwrap();
        let out = render_crop(&img, CropRect::full(10, 20), rotation).unwrap().flatten();

        assert_eq!(out.dimensions(), (10, 20));
        assert_eq!(out.pixel(0, 0), Some([0, 9, 200]));
        assert_eq!(out.pixel(9, 0), Some([0, 0, 200]));
        assert_eq!(out.pixel(0, 19), Some([19, 9, 200]));
    }

    #[test]
    fn test_region_beyond_image_is_black() {
        let img = coords(4, 4);
        let out = render_crop(&img, CropRect::new(2, 2, 4, 4), Rotation::NONE).unwrap().flatten();

        assert_eq!(out.dimensions(), (4, 4));
        assert_eq!(out.pixel(0, 0), Some([2, 2, 200]));
        assert_eq!(out.pixel(3, 3), Some([0, 0, 0]));
    }

    #[test]
    fn test_get_cropped_image_100x100() {
        let source = png_source(100, 100);
        let blob =
            get_cropped_image(&source, CropRect::new(0, 0, 100, 100), Rotation::NONE, 92).unwrap();

        assert_eq!(blob.format(), ImageFormat::Jpeg);
        let decoded = decode_image(blob.bytes()).unwrap();
        assert_eq!(decoded.dimensions(), (100, 100));
    }

    #[test]
    fn test_get_cropped_image_close_to_source() {
        let source = png_source(64, 64);
        let blob =
            get_cropped_image(&source, CropRect::full(64, 64), Rotation::NONE, 100).unwrap();
        let decoded = decode_image(blob.bytes()).unwrap();
        let original = coords(64, 64);

        let max_diff = decoded
            .pixels
            .iter()
            .zip(&original.pixels)
            .map(|(a, b)| (*a as i32 - *b as i32).abs())
            .max()
            .unwrap();
        assert!(max_diff <= 16, "max channel difference {max_diff}");
    }

    #[test]
    fn test_get_cropped_image_load_failure() {
        let result = get_cropped_image(b"nope", CropRect::full(1, 1), Rotation::NONE, 92);
        assert!(matches!(result, Err(CropError::LoadFailed(_))));
    }

    #[test]
    fn test_get_cropped_image_empty_rect() {
        let source = png_source(10, 10);
        let result = get_cropped_image(&source, CropRect::new(0, 0, 0, 5), Rotation::NONE, 92);
        assert!(matches!(result, Err(CropError::CanvasEmpty)));
    }

    #[test]
    fn test_oversized_rect_is_refused() {
        let source = png_source(4, 4);
        let rect = CropRect::new(0, 0, 1 << 20, 1 << 20);
        let result = get_cropped_image(&source, rect, Rotation::NONE, 92);
        assert!(matches!(
            result,
            Err(CropError::TooLarge {
                width: 1048576,
                height: 1048576
            })
        ));

        let widest = CropRect::new(0, 0, u32::MAX, u32::MAX);
        assert!(matches!(
            render_crop(&coords(2, 2), widest, Rotation::NONE),
            Err(CropError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_rect_at_limit_is_checked_by_area() {
        // The cap is on area, not on either side
        assert!(check_area(CropRect::new(0, 0, 16_384, 16_384)).is_ok());
        assert!(check_area(CropRect::new(0, 0, 16_384 * 16_384, 1)).is_ok());
        assert!(check_area(CropRect::new(0, 0, 16_384 * 16_384 + 1, 1)).is_err());
    }

    #[test]
    fn test_crop_is_deterministic() {
        let source = png_source(30, 20);
        let rect = CropRect::new(3, 4, 10, 10);
        let rotation = Rotation::from_degrees(270).unwrap();
        let a = get_cropped_image(&source, rect, rotation, 92).unwrap();
        let b = get_cropped_image(&source, rect, rotation, 92).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CropError::CanvasEmpty.to_string(), "Canvas is empty");
        let err = CropError::from(DecodeError::InvalidFormat);
        assert_eq!(
            err.to_string(),
            "Failed to load image: Invalid or unsupported image format"
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_output_matches_rect(
            w in 1u32..=40,
            h in 1u32..=40,
            x in 0u32..60,
            y in 0u32..60,
            rw in 1u32..=50,
            rh in 1u32..=50,
            turns in 0i32..4,
        ) {
            let img = DecodedImage::new(w, h, vec![90u8; (w * h * 3) as usize]);
            let rotation = Rotation::from_degrees(turns * 90).unwrap();
            let canvas = render_crop(&img, CropRect::new(x, y, rw, rh), rotation).unwrap();

            prop_assert_eq!((canvas.width(), canvas.height()), (rw, rh));
        }
    }
}
