//! The editor root: single owner of all application state.
//!
//! State transitions are synchronous. The two operations that need the
//! photo's bytes, [`Editor::complete_crop`] and [`Editor::export_composite`],
//! take them as arguments; the host performs the asynchronous fetch first and
//! only calls in once the bytes are available. Downloads are emitted through
//! [`EditorHost`] after encoding has finished.
//!
//! Failures are logged at the operation boundary and returned; they never
//! touch the filter, rotation or displayed source. A failed crop also leaves
//! the editor in crop mode with the last reported rectangle still set.

use thiserror::Error;

use crate::blob::ImageBlob;
use crate::config::EditorConfig;
use crate::crop::{get_cropped_image, CropError};
use crate::export::{export_composite, ExportError};
use crate::filter::FilterStyle;
use crate::transform::{CropRect, Rotation};

/// Error reported by the host platform.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct HostError(pub String);

/// Platform services the editor needs to publish its results.
pub trait EditorHost {
    /// Register an encoded image and return a URL usable both as an image
    /// source and as a download target.
    fn create_object_url(&mut self, blob: &ImageBlob) -> Result<String, HostError>;

    /// Save the resource at `url` as a file named `file_name`.
    fn download(&mut self, file_name: &str, url: &str) -> Result<(), HostError>;
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No crop area has been reported")]
    NoCropArea,

    #[error("Not in crop mode")]
    NotInCropMode,

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// The result of the most recent successful crop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedImage {
    pub url: String,
    pub blob: ImageBlob,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub filter: FilterStyle,
    pub rotation: Rotation,
    pub crop_mode: bool,
    /// Last area reported by the crop widget; uncommitted until a crop
    /// completes.
    pub crop_area: Option<CropRect>,
    /// Replaces the static source as the displayed photo once set.
    pub cropped_image: Option<CroppedImage>,
}

/// What a toolbar button asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    SetFilter(FilterStyle),
    Rotate,
    EnterCropMode,
    CancelCropMode,
    SaveCrop,
    SaveImage,
}

/// Work the host must finish asynchronously after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingTask {
    /// Fetch the static source, then call [`Editor::complete_crop`].
    Crop,
    /// Fetch the displayed source, then call [`Editor::export_composite`].
    Export,
}

#[derive(Debug, Clone, Default)]
pub struct Editor {
    config: EditorConfig,
    state: EditorState,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config: config.normalized(),
            state: EditorState::default(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn filter(&self) -> FilterStyle {
        self.state.filter
    }

    pub fn rotation(&self) -> Rotation {
        self.state.rotation
    }

    pub fn is_crop_mode(&self) -> bool {
        self.state.crop_mode
    }

    pub fn crop_area(&self) -> Option<CropRect> {
        self.state.crop_area
    }

    pub fn cropped_image(&self) -> Option<&CroppedImage> {
        self.state.cropped_image.as_ref()
    }

    /// URL of the photo currently on screen.
    pub fn displayed_src(&self) -> &str {
        self.state
            .cropped_image
            .as_ref()
            .map_or(self.config.source_url.as_str(), |c| c.url.as_str())
    }

    /// Bytes of the displayed photo when they are already in memory.
    ///
    /// `None` means the static source is displayed and must be fetched.
    pub fn displayed_bytes(&self) -> Option<&[u8]> {
        self.state.cropped_image.as_ref().map(|c| c.blob.bytes())
    }

    pub fn set_filter_style(&mut self, style: FilterStyle) {
        log::debug!("filter {:?} -> {:?}", self.state.filter, style);
        self.state.filter = style;
    }

    /// Advance the rotation by 90°, wrapping at 360.
    pub fn rotate(&mut self) -> Rotation {
        self.state.rotation = self.state.rotation.next();
        log::debug!("rotation -> {}", self.state.rotation);
        self.state.rotation
    }

    pub fn enter_crop_mode(&mut self) {
        log::debug!("entering crop mode");
        self.state.crop_mode = true;
    }

    /// Leave crop mode, discarding any uncommitted crop area.
    pub fn cancel_crop_mode(&mut self) {
        log::debug!("leaving crop mode");
        self.state.crop_mode = false;
        self.state.crop_area = None;
    }

    /// Record the crop widget's latest area. Ignored outside crop mode.
    pub fn report_crop_area(&mut self, rect: CropRect) -> bool {
        if !self.state.crop_mode {
            log::warn!("ignoring crop area reported outside crop mode");
            return false;
        }
        self.state.crop_area = Some(rect);
        true
    }

    /// Area the crop widget starts with for a source of the given size:
    /// the largest centered rectangle of the configured aspect within the
    /// rotated frame.
    pub fn default_crop_area(&self, source_width: u32, source_height: u32) -> CropRect {
        let (w, h) = self
            .state
            .rotation
            .rotated_dimensions(source_width, source_height);
        CropRect::centered(w, h, self.config.crop_aspect)
    }

    /// The area a crop would use right now.
    ///
    /// Hosts check this before fetching the source.
    pub fn crop_request(&self) -> Result<CropRect, EditorError> {
        if !self.state.crop_mode {
            return Err(EditorError::NotInCropMode);
        }
        self.state.crop_area.ok_or(EditorError::NoCropArea)
    }

    /// Crop the static source with the last reported area and rotation.
    ///
    /// On success the result becomes the displayed photo, crop mode ends and
    /// the result is downloaded.
    pub fn complete_crop(
        &mut self,
        source: &[u8],
        host: &mut impl EditorHost,
    ) -> Result<(), EditorError> {
        let result = self.try_complete_crop(source, host);
        if let Err(err) = &result {
            log::error!("crop failed: {err}");
        }
        result
    }

    fn try_complete_crop(
        &mut self,
        source: &[u8],
        host: &mut impl EditorHost,
    ) -> Result<(), EditorError> {
        let rect = self.crop_request()?;

        let blob = get_cropped_image(source, rect, self.state.rotation, self.config.jpeg_quality)?;
        let url = host.create_object_url(&blob)?;
        log::info!("crop ready: {} bytes at {url}", blob.len());

        self.state.cropped_image = Some(CroppedImage {
            url: url.clone(),
            blob,
        });
        self.state.crop_mode = false;
        self.state.crop_area = None;

        host.download(&self.config.cropped_file_name, &url)?;
        Ok(())
    }

    /// Rasterize the displayed view and download it as PNG.
    ///
    /// `displayed` must be the bytes of [`Editor::displayed_src`].
    pub fn export_composite(
        &self,
        displayed: &[u8],
        host: &mut impl EditorHost,
    ) -> Result<(), EditorError> {
        let result = self.try_export_composite(displayed, host);
        if let Err(err) = &result {
            log::error!("Failed to save image: {err}");
        }
        result
    }

    fn try_export_composite(
        &self,
        displayed: &[u8],
        host: &mut impl EditorHost,
    ) -> Result<(), EditorError> {
        let blob = export_composite(displayed, self.state.filter, self.state.rotation)?;
        let url = host.create_object_url(&blob)?;
        log::info!("export ready: {} bytes", blob.len());
        host.download(&self.config.export_file_name, &url)?;
        Ok(())
    }

    /// Apply a button action. Returns the asynchronous work the host still
    /// has to perform, if any.
    pub fn dispatch(&mut self, action: EditorAction) -> Option<PendingTask> {
        match action {
            EditorAction::SetFilter(style) => self.set_filter_style(style),
            EditorAction::Rotate => {
                self.rotate();
            }
            EditorAction::EnterCropMode => self.enter_crop_mode(),
            EditorAction::CancelCropMode => self.cancel_crop_mode(),
            EditorAction::SaveCrop => return Some(PendingTask::Crop),
            EditorAction::SaveImage => return Some(PendingTask::Export),
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Host that records what it was asked to do.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub urls: Vec<(String, &'static str, usize)>,
        pub downloads: Vec<(String, String)>,
        pub fail_object_url: bool,
        pub fail_download: bool,
    }

    impl EditorHost for RecordingHost {
        fn create_object_url(&mut self, blob: &ImageBlob) -> Result<String, HostError> {
            if self.fail_object_url {
                return Err(HostError("createObjectURL failed".to_string()));
            }
            let url = format!("blob:test/{}", self.urls.len() + 1);
            self.urls.push((url.clone(), blob.mime(), blob.len()));
            Ok(url)
        }

        fn download(&mut self, file_name: &str, url: &str) -> Result<(), HostError> {
            if self.fail_download {
                return Err(HostError("click failed".to_string()));
            }
            self.downloads.push((file_name.to_string(), url.to_string()));
            Ok(())
        }
    }
}
