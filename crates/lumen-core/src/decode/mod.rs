//! Image decoding for Lumen.
//!
//! The editor works on a single static photo. Decoding turns the fetched
//! asset bytes (or a previously produced crop) into oriented RGB pixels.
//! All operations are synchronous; the browser host awaits the fetch before
//! calling in.

mod load;
mod types;

pub use load::decode_image;
pub use types::{DecodeError, DecodedImage, Orientation};
