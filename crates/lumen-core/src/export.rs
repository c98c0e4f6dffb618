//! Composite export: rasterize the displayed view to a PNG.
//!
//! The displayed view is the current photo source with the active filter
//! preset and rotation class applied. The filter is applied before the
//! rotation, which matches CSS where `filter` is painted in the element's
//! local coordinate space and `transform` is applied afterwards.

use thiserror::Error;

use crate::blob::ImageBlob;
use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode_png, EncodeError};
use crate::filter::{apply_filter, FilterStyle};
use crate::transform::{rotate_quarter, Rotation};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to load displayed image: {0}")]
    Load(#[from] DecodeError),

    #[error("Failed to render composite: {0}")]
    Render(#[from] EncodeError),
}

/// Apply filter then rotation to a decoded image.
pub fn render_composite(
    image: &DecodedImage,
    filter: FilterStyle,
    rotation: Rotation,
) -> DecodedImage {
    let mut filtered = image.clone();
    apply_filter(&mut filtered, filter);
    rotate_quarter(&filtered, rotation)
}

/// Decode the displayed source, composite it and encode as PNG.
pub fn export_composite(
    source: &[u8],
    filter: FilterStyle,
    rotation: Rotation,
) -> Result<ImageBlob, ExportError> {
    let image = decode_image(source)?;
    let composite = render_composite(&image, filter, rotation);
    let bytes = encode_png(&composite.pixels, composite.width, composite.height)?;
    log::debug!(
        "exported {}x{} composite (filter {:?}, rotation {}) into {} bytes",
        composite.width,
        composite.height,
        filter,
        rotation,
        bytes.len()
    );
    Ok(ImageBlob::png(bytes))
}
