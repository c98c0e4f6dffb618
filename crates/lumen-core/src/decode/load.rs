//! Source image loading with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode a JPEG or PNG image from bytes, applying EXIF orientation.
///
/// The result matches what a browser paints for an `<img>` element with the
/// same source: oriented, opaque RGB.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are empty or not a
/// recognized format, and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = orientation.apply(img).into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb_img))
}

/// Read the EXIF orientation tag, defaulting to `Normal` when absent.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_jpeg, encode_png};

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 128]);
            }
        }
        pixels
    }

    #[test]
    fn test_decode_png_is_lossless() {
        let pixels = gradient(8, 5);
        let png = encode_png(&pixels, 8, 5).unwrap();

        let img = decode_image(&png).unwrap();
        assert_eq!(img.dimensions(), (8, 5));
        assert_eq!(img.pixels, pixels);
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let jpeg = encode_jpeg(&gradient(12, 7), 12, 7, 90).unwrap();

        let img = decode_image(&jpeg).unwrap();
        assert_eq!(img.dimensions(), (12, 7));
        assert_eq!(img.pixels.len(), 12 * 7 * 3);
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_png(&gradient(16, 16), 16, 16).unwrap();
        let result = decode_image(&png[..png.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_missing_exif_is_normal() {
        let png = encode_png(&gradient(2, 2), 2, 2).unwrap();
        assert_eq!(extract_orientation(&png), Orientation::Normal);
    }
}
