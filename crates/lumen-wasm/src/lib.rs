//! Lumen WASM - WebAssembly bindings and browser front end for Lumen
//!
//! This crate exposes the lumen-core functionality to JavaScript and renders
//! the editor into a page.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` / `encode` - Image decoding and encoding bindings
//! - `filter` - Filter preset bindings
//! - `transform` - Rotation and crop bindings
//! - `editor` - `JsEditor`, the stateful editor handle
//! - `dom` - Fetching, object URLs and downloads
//! - `ui` - `mount`, which renders the photo and toolbar into the DOM
//!
//! # Usage
//!
//! ```typescript
//! import init, { mount } from '@lumen/wasm';
//!
//! await init();
//! const editor = mount('app', { sourceUrl: '/assets/yousuf.jpg' });
//! editor.set_filter('style2');
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod dom;
mod editor;
mod encode;
mod filter;
mod session;
mod transform;
mod types;
mod ui;

pub use decode::decode_image;
pub use editor::JsEditor;
pub use encode::{encode_jpeg, encode_png};
pub use filter::{apply_filter, css_filter};
pub use transform::{crop_image, rotate_image};
pub use types::JsDecodedImage;
pub use ui::mount;

/// Initialize the WASM module (called automatically on load).
///
/// Routes panics and `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("lumen {} ready", version());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
