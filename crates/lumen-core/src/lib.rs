//! Lumen Core - single-photo editing library
//!
//! This crate provides the platform-independent side of the Lumen photo
//! editor: filter presets, quarter-turn rotation, safe-area cropping to JPEG,
//! composite export to PNG, and the [`Editor`] state owner that ties them
//! together. Browser bindings live in `lumen-wasm`.

pub mod blob;
pub mod config;
pub mod crop;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod export;
pub mod filter;
pub mod luminance;
pub mod selection;
pub mod transform;
pub mod view;

pub use blob::{ImageBlob, ImageFormat};
pub use config::EditorConfig;
pub use crop::{get_cropped_image, render_crop, CropError, MAX_CANVAS_AREA};
pub use decode::{decode_image, DecodeError, DecodedImage};
pub use editor::{
    CroppedImage, Editor, EditorAction, EditorError, EditorHost, EditorState, HostError,
    PendingTask,
};
pub use encode::{encode_jpeg, encode_png, EncodeError};
pub use export::{export_composite, render_composite, ExportError};
pub use filter::{apply_filter, FilterError, FilterStyle};
pub use selection::CropSelection;
pub use transform::{rotate_quarter, CropRect, Rotation, RotationError};
pub use view::{ButtonSpec, CropView, PhotoView};
