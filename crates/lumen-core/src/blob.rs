//! Encoded image payloads handed to the host.
//!
//! An [`ImageBlob`] is what the browser would hold as a `Blob`: encoded bytes
//! plus a MIME type. The host turns it into an object URL so it can serve as
//! both an `<img>` source and a download target.

use serde::{Deserialize, Serialize};

/// Encoded image format of a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

/// An encoded image held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl ImageBlob {
    pub fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self::new(ImageFormat::Jpeg, bytes)
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(ImageFormat::Png, bytes)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
