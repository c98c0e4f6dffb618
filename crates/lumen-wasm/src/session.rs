//! Shared editor session for the JS handle and the mounted UI.
//!
//! The editor is borrowed only between awaits, never across one. Crop and
//! export are guarded by a single in-flight flag: a second request while one
//! is running is refused with a warning.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lumen_core::config::EditorConfig;
use lumen_core::editor::{Editor, EditorAction, PendingTask};
use wasm_bindgen::prelude::*;

use crate::dom::{fetch_bytes, BrowserHost};

type Listener = Rc<dyn Fn()>;

#[derive(Clone)]
pub(crate) struct Session {
    editor: Rc<RefCell<Editor>>,
    in_flight: Rc<Cell<bool>>,
    listener: Rc<RefCell<Option<Listener>>>,
}

impl Session {
    pub(crate) fn new(config: EditorConfig) -> Self {
        Self {
            editor: Rc::new(RefCell::new(Editor::new(config))),
            in_flight: Rc::new(Cell::new(false)),
            listener: Rc::new(RefCell::new(None)),
        }
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&Editor) -> R) -> R {
        f(&self.editor.borrow())
    }

    /// Mutate the editor, then notify the listener.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut Editor) -> R) -> R {
        let result = f(&mut self.editor.borrow_mut());
        self.notify();
        result
    }

    /// Mutate the editor without notifying the listener.
    pub(crate) fn update_quietly<R>(&self, f: impl FnOnce(&mut Editor) -> R) -> R {
        f(&mut self.editor.borrow_mut())
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Called after every state change (the UI re-renders from it).
    pub(crate) fn set_listener(&self, listener: impl Fn() + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    fn notify(&self) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    /// Apply a button action and run any asynchronous work it needs.
    pub(crate) async fn dispatch(&self, action: EditorAction) -> Result<(), JsValue> {
        match self.update(|editor| editor.dispatch(action)) {
            Some(task) => self.run(task).await,
            None => Ok(()),
        }
    }

    pub(crate) async fn run(&self, task: PendingTask) -> Result<(), JsValue> {
        if self.in_flight.replace(true) {
            log::warn!("{task:?} ignored: another operation is still running");
            return Err(JsValue::from_str("Another operation is still running"));
        }
        let result = match task {
            PendingTask::Crop => self.crop().await,
            PendingTask::Export => self.export().await,
        };
        self.in_flight.set(false);
        self.notify();
        result
    }

    async fn crop(&self) -> Result<(), JsValue> {
        if let Err(err) = self.with(|editor| editor.crop_request()) {
            log::error!("crop failed: {err}");
            return Err(JsValue::from_str(&err.to_string()));
        }
        // Crops always start from the static source, never a previous result
        let url = self.with(|editor| editor.config().source_url.clone());
        let source = fetch_bytes(&url).await.inspect_err(|err| {
            log::error!("crop failed: could not load {url}: {err:?}");
        })?;

        self.editor
            .borrow_mut()
            .complete_crop(&source, &mut BrowserHost)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    async fn export(&self) -> Result<(), JsValue> {
        let (cached, url) = self.with(|editor| {
            (
                editor.displayed_bytes().map(<[u8]>::to_vec),
                editor.displayed_src().to_string(),
            )
        });
        let displayed = match cached {
            Some(bytes) => bytes,
            None => fetch_bytes(&url).await.inspect_err(|err| {
                log::error!("Failed to save image: could not load {url}: {err:?}");
            })?,
        };

        self.editor
            .borrow()
            .export_composite(&displayed, &mut BrowserHost)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
