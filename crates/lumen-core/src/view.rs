//! View model for the photo and toolbar.
//!
//! Hosts render from these descriptions instead of reading editor state
//! directly, so the markup stays a pure function of [`Editor`].

use serde::Serialize;

use crate::editor::{Editor, EditorAction};
use crate::filter::FilterStyle;

pub const PHOTO_CLASS: &str = "photo";
pub const BUTTON_CLASS: &str = "button";

/// The displayed photo element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoView {
    pub src: String,
    /// `photo`, then the filter tag and rotation class when set.
    pub class_name: String,
    pub css_filter: &'static str,
    pub rotation: u16,
}

/// The crop widget shown in crop mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropView {
    /// Always the static source; crops never compound.
    pub src: String,
    pub aspect: f64,
    pub rotation: u16,
}

/// A toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSpec {
    pub label: &'static str,
    pub action: EditorAction,
}

impl ButtonSpec {
    pub const fn new(label: &'static str, action: EditorAction) -> Self {
        Self { label, action }
    }

    pub fn class_name(&self) -> &'static str {
        BUTTON_CLASS
    }
}

const NORMAL_TAIL: [ButtonSpec; 3] = [
    ButtonSpec::new("Rotate", EditorAction::Rotate),
    ButtonSpec::new("Crop", EditorAction::EnterCropMode),
    ButtonSpec::new("Save Image", EditorAction::SaveImage),
];

const CROP_BUTTONS: [ButtonSpec; 2] = [
    ButtonSpec::new("Save Cropped Image", EditorAction::SaveCrop),
    ButtonSpec::new("Cancel", EditorAction::CancelCropMode),
];

fn photo_class(filter: FilterStyle, rotation_class: Option<String>) -> String {
    let mut class = String::from(PHOTO_CLASS);
    if filter != FilterStyle::None {
        class.push(' ');
        class.push_str(filter.tag());
    }
    if let Some(rotation_class) = rotation_class {
        class.push(' ');
        class.push_str(&rotation_class);
    }
    class
}

impl Editor {
    pub fn photo_view(&self) -> PhotoView {
        let rotation = self.rotation();
        let rotation_class = (rotation.degrees() != 0).then(|| rotation.css_class());
        PhotoView {
            src: self.displayed_src().to_string(),
            class_name: photo_class(self.filter(), rotation_class),
            css_filter: self.filter().css_filter(),
            rotation: rotation.degrees(),
        }
    }

    /// Crop widget description, or `None` outside crop mode.
    pub fn crop_view(&self) -> Option<CropView> {
        self.is_crop_mode().then(|| CropView {
            src: self.config().source_url.clone(),
            aspect: self.config().crop_aspect,
            rotation: self.rotation().degrees(),
        })
    }

    /// Toolbar for the current mode.
    pub fn buttons(&self) -> Vec<ButtonSpec> {
        if self.is_crop_mode() {
            return CROP_BUTTONS.to_vec();
        }
        FilterStyle::PRESETS
            .iter()
            .map(|&style| ButtonSpec::new(style.label(), EditorAction::SetFilter(style)))
            .chain(NORMAL_TAIL)
            .collect()
    }
}
