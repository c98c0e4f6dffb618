//! Stateful editor handle for JavaScript.
//!
//! `JsEditor` owns (or, when returned by `mount`, shares) a single editor.
//! Synchronous methods change state immediately; `complete_crop`,
//! `export_composite` and `dispatch` return Promises that settle once the
//! download has been triggered.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditor } from '@lumen/wasm';
//!
//! const editor = new JsEditor({ jpegQuality: 90 });
//! editor.enter_crop_mode();
//! editor.report_crop_area(0, 0, 400, 300);
//! await editor.complete_crop();     // downloads cropped-image.jpg
//! await editor.export_composite();  // downloads edited-image.png
//! ```

use lumen_core::config::EditorConfig;
use lumen_core::editor::{EditorAction, PendingTask};
use lumen_core::filter::FilterStyle;
use lumen_core::transform::CropRect;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::session::Session;

/// Read an [`EditorConfig`] from a JS object; `undefined` and `null` give the
/// defaults and missing fields fall back individually.
pub(crate) fn config_from_js(value: JsValue) -> Result<EditorConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn action_from_name(name: &str) -> Result<EditorAction, JsValue> {
    let action = match name {
        "rotate" => EditorAction::Rotate,
        "crop" => EditorAction::EnterCropMode,
        "cancel" => EditorAction::CancelCropMode,
        "save-crop" => EditorAction::SaveCrop,
        "save" => EditorAction::SaveImage,
        tag => EditorAction::SetFilter(
            tag.parse::<FilterStyle>()
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
        ),
    };
    Ok(action)
}

#[wasm_bindgen]
pub struct JsEditor {
    session: Session,
}

impl JsEditor {
    pub(crate) fn from_session(session: Session) -> Self {
        Self { session }
    }

    fn spawn(&self, task: PendingTask) -> js_sys::Promise {
        let session = self.session.clone();
        future_to_promise(async move {
            session.run(task).await?;
            Ok(JsValue::UNDEFINED)
        })
    }
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor. `config` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        Ok(Self::from_session(Session::new(config_from_js(config)?)))
    }

    /// Active filter tag (`style1`..`style7`, or empty).
    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> String {
        self.session.with(|editor| editor.filter().tag().to_string())
    }

    /// Rotation in degrees (0, 90, 180 or 270).
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u16 {
        self.session.with(|editor| editor.rotation().degrees())
    }

    #[wasm_bindgen(getter)]
    pub fn crop_mode(&self) -> bool {
        self.session.with(|editor| editor.is_crop_mode())
    }

    /// URL of the photo currently displayed.
    #[wasm_bindgen(getter)]
    pub fn displayed_src(&self) -> String {
        self.session
            .with(|editor| editor.displayed_src().to_string())
    }

    /// Whether a crop or export is running.
    #[wasm_bindgen(getter)]
    pub fn busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn set_filter(&self, tag: &str) -> Result<(), JsValue> {
        let style = tag
            .parse::<FilterStyle>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.update(|editor| editor.set_filter_style(style));
        Ok(())
    }

    /// Advance rotation by 90° and return the new angle.
    pub fn rotate(&self) -> u16 {
        self.session.update(|editor| editor.rotate().degrees())
    }

    pub fn enter_crop_mode(&self) {
        self.session.update(|editor| editor.enter_crop_mode());
    }

    pub fn cancel_crop_mode(&self) {
        self.session.update(|editor| editor.cancel_crop_mode());
    }

    /// Report the crop widget's area, relative to the rotated photo.
    ///
    /// Returns `false` when not in crop mode.
    pub fn report_crop_area(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        self.session
            .update(|editor| editor.report_crop_area(CropRect::new(x, y, width, height)))
    }

    /// Area the crop widget should start with for a source of this size.
    pub fn default_crop_area(&self, source_width: u32, source_height: u32) -> Vec<u32> {
        let rect = self
            .session
            .with(|editor| editor.default_crop_area(source_width, source_height));
        vec![rect.x, rect.y, rect.width, rect.height]
    }

    /// Current photo view (`{ src, className, cssFilter, rotation }`).
    pub fn photo_view(&self) -> Result<JsValue, JsValue> {
        let view = self.session.with(|editor| editor.photo_view());
        serde_wasm_bindgen::to_value(&view).map_err(JsValue::from)
    }

    /// Labels of the toolbar buttons for the current mode.
    pub fn button_labels(&self) -> Vec<String> {
        self.session.with(|editor| {
            editor
                .buttons()
                .iter()
                .map(|button| button.label.to_string())
                .collect()
        })
    }

    /// Crop the static source and download `cropped-image.jpg`.
    pub fn complete_crop(&self) -> js_sys::Promise {
        self.spawn(PendingTask::Crop)
    }

    /// Render the displayed view and download `edited-image.png`.
    pub fn export_composite(&self) -> js_sys::Promise {
        self.spawn(PendingTask::Export)
    }

    /// Run a toolbar action by name: a filter tag, `rotate`, `crop`,
    /// `cancel`, `save-crop` or `save`.
    pub fn dispatch(&self, name: &str) -> Result<js_sys::Promise, JsValue> {
        let action = action_from_name(name)?;
        let session = self.session.clone();
        Ok(future_to_promise(async move {
            session.dispatch(action).await?;
            Ok(JsValue::UNDEFINED)
        }))
    }
}
