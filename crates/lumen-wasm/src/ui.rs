//! DOM front end.
//!
//! [`mount`] renders into an existing element:
//!
//! ```html
//! <div id="app">
//!   <img class="photo style2 rotate-90" src="...">
//!   <div class="toolbar">
//!     <button class="button">Sepia</button> ...
//!   </div>
//! </div>
//! ```
//!
//! Every state change re-renders the whole root. In crop mode the photo is
//! replaced by a crop area: the static source, rotated, under a selection
//! that keeps the configured aspect. Dragging the selection pans it and the
//! wheel zooms it. Each change is reported to the editor in rotated-frame
//! pixels without a re-render.

use std::cell::RefCell;
use std::rc::Rc;

use lumen_core::editor::EditorAction;
use lumen_core::selection::{CropSelection, ZOOM_STEP};
use lumen_core::transform::CropRect;
use lumen_core::view::{ButtonSpec, CropView, PhotoView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, Node, PointerEvent,
    WheelEvent,
};

use crate::dom::document;
use crate::editor::{config_from_js, JsEditor};
use crate::session::Session;

/// Longest side of the crop area on screen, in CSS pixels.
const CROP_VIEWPORT_PX: f64 = 640.0;

struct App {
    root: Element,
    session: Session,
}

/// Render the editor into the element with id `root_id`.
///
/// Returns a handle sharing the mounted editor; changes made through it
/// re-render the page.
#[wasm_bindgen]
pub fn mount(root_id: &str, config: JsValue) -> Result<JsEditor, JsValue> {
    let config = config_from_js(config)?;
    let root = document()?
        .get_element_by_id(root_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{root_id}'")))?;

    let app = Rc::new(App {
        root,
        session: Session::new(config),
    });

    let listener = Rc::clone(&app);
    app.session.set_listener(move || {
        if let Err(err) = render(&listener) {
            log::error!("render failed: {err:?}");
        }
    });
    render(&app)?;
    log::info!("mounted editor on #{root_id}");

    Ok(JsEditor::from_session(app.session.clone()))
}

fn render(app: &Rc<App>) -> Result<(), JsValue> {
    let doc = document()?;
    app.root.set_inner_html("");

    let (photo, crop, buttons) = app
        .session
        .with(|editor| (editor.photo_view(), editor.crop_view(), editor.buttons()));

    let image: Node = match crop {
        Some(crop) => crop_area(&doc, &app.session, &crop)?.into(),
        None => photo_image(&doc, &photo)?.into(),
    };
    app.root.append_child(&image)?;

    let toolbar = doc.create_element("div")?;
    toolbar.set_class_name("toolbar");
    for spec in buttons {
        toolbar.append_child(&button(&doc, &app.session, spec)?.into())?;
    }
    app.root.append_child(&toolbar)?;
    Ok(())
}

fn photo_image(doc: &Document, view: &PhotoView) -> Result<HtmlImageElement, JsValue> {
    let img: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
    img.set_class_name(&view.class_name);
    img.set_alt("Photo");
    // Inline style so the presets work without the stylesheet
    img.set_attribute(
        "style",
        &format!(
            "filter: {}; transform: rotate({}deg);",
            view.css_filter, view.rotation
        ),
    )?;
    img.set_src(&view.src);
    Ok(img)
}

fn crop_area(doc: &Document, session: &Session, view: &CropView) -> Result<HtmlElement, JsValue> {
    let container: HtmlElement = doc.create_element("div")?.dyn_into()?;
    container.set_class_name("crop-area");
    let img: HtmlImageElement = doc.create_element("img")?.dyn_into()?;
    img.set_class_name("crop-source");
    img.set_alt("Crop");
    img.set_attribute("style", &format!("transform: rotate({}deg);", view.rotation))?;
    container.append_child(&img)?;

    let src = view.src.clone();
    let (doc, session, view) = (doc.clone(), session.clone(), view.clone());
    let (area, loaded) = (container.clone(), img.clone());
    let onload = Closure::<dyn FnMut()>::new(move || {
        let source = (loaded.natural_width(), loaded.natural_height());
        if let Err(err) = attach_selection(&doc, &area, &loaded, &session, &view, source) {
            log::error!("crop selection failed: {err:?}");
        }
    });
    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    img.set_src(&src);
    Ok(container)
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    x: f64,
    y: f64,
    start: CropRect,
}

/// Selection state behind the crop overlay. Pointer positions are CSS
/// pixels; `scale` maps frame pixels to CSS pixels.
struct CropWidget {
    session: Session,
    selection: CropSelection,
    scale: f64,
    overlay: HtmlElement,
    drag: Option<Drag>,
}

impl CropWidget {
    fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag = Some(Drag {
            x,
            y,
            start: self.selection.rect(),
        });
    }

    fn drag_to(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let Some(drag) = self.drag else {
            return Ok(());
        };
        let (dx, dy) = ((x - drag.x) / self.scale, (y - drag.y) / self.scale);
        self.selection.pan_from(drag.start, dx, dy);
        self.commit()
    }

    fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Negative `delta_y` (wheel up) zooms in.
    fn zoom(&mut self, delta_y: f64) -> Result<(), JsValue> {
        if delta_y == 0.0 {
            return Ok(());
        }
        let factor = if delta_y < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        self.selection.zoom(factor);
        self.commit()
    }

    fn commit(&self) -> Result<(), JsValue> {
        let rect = self.selection.rect();
        // Quiet update: a re-render would reload the source image
        self.session
            .update_quietly(|editor| editor.report_crop_area(rect));
        place_overlay(&self.overlay, rect, self.scale)
    }
}

fn place_overlay(overlay: &HtmlElement, rect: CropRect, scale: f64) -> Result<(), JsValue> {
    overlay.set_attribute(
        "style",
        &format!(
            "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; \
             box-shadow: 0 0 0 9999px rgba(0, 0, 0, 0.5); border: 1px solid #fff; \
             box-sizing: border-box; cursor: move; touch-action: none;",
            rect.x as f64 * scale,
            rect.y as f64 * scale,
            rect.width as f64 * scale,
            rect.height as f64 * scale,
        ),
    )
}

/// Lay out the crop area for a `source` of natural size and put the
/// selection on top. Resumes from the editor's crop area when it still fits.
fn attach_selection(
    doc: &Document,
    container: &HtmlElement,
    img: &HtmlImageElement,
    session: &Session,
    view: &CropView,
    source: (u32, u32),
) -> Result<Rc<RefCell<CropWidget>>, JsValue> {
    let (frame_width, frame_height) =
        session.with(|editor| editor.rotation().rotated_dimensions(source.0, source.1));
    let previous = session.with(|editor| editor.crop_area());
    let selection = CropSelection::resume(frame_width, frame_height, view.aspect, previous);

    let longest = frame_width.max(frame_height);
    let scale = if longest == 0 {
        1.0
    } else {
        (CROP_VIEWPORT_PX / longest as f64).min(1.0)
    };

    container.set_attribute(
        "style",
        &format!(
            "position: relative; overflow: hidden; width: {}px; height: {}px;",
            frame_width as f64 * scale,
            frame_height as f64 * scale,
        ),
    )?;
    // Centered so the rotated box lands exactly on the frame
    img.set_attribute(
        "style",
        &format!(
            "position: absolute; left: 50%; top: 50%; width: {}px; height: {}px; \
             transform: translate(-50%, -50%) rotate({}deg);",
            source.0 as f64 * scale,
            source.1 as f64 * scale,
            view.rotation,
        ),
    )?;

    let overlay: HtmlElement = doc.create_element("div")?.dyn_into()?;
    overlay.set_class_name("crop-selection");
    container.append_child(&overlay)?;

    let widget = Rc::new(RefCell::new(CropWidget {
        session: session.clone(),
        selection,
        scale,
        overlay: overlay.clone(),
        drag: None,
    }));
    widget.borrow().commit()?;

    let target = overlay.clone();
    let state = Rc::clone(&widget);
    let on_down = Closure::<dyn FnMut(PointerEvent)>::new(move |ev: PointerEvent| {
        ev.prevent_default();
        if let Err(err) = target.set_pointer_capture(ev.pointer_id()) {
            log::warn!("pointer capture failed: {err:?}");
        }
        state
            .borrow_mut()
            .begin_drag(ev.client_x() as f64, ev.client_y() as f64);
    });
    overlay.set_onpointerdown(Some(on_down.as_ref().unchecked_ref()));
    on_down.forget();

    let state = Rc::clone(&widget);
    let on_move = Closure::<dyn FnMut(PointerEvent)>::new(move |ev: PointerEvent| {
        let moved = state
            .borrow_mut()
            .drag_to(ev.client_x() as f64, ev.client_y() as f64);
        if let Err(err) = moved {
            log::error!("crop drag failed: {err:?}");
        }
    });
    overlay.set_onpointermove(Some(on_move.as_ref().unchecked_ref()));
    on_move.forget();

    let state = Rc::clone(&widget);
    let on_up = Closure::<dyn FnMut(PointerEvent)>::new(move |_: PointerEvent| {
        state.borrow_mut().end_drag();
    });
    overlay.set_onpointerup(Some(on_up.as_ref().unchecked_ref()));
    overlay.set_onpointercancel(Some(on_up.as_ref().unchecked_ref()));
    on_up.forget();

    let state = Rc::clone(&widget);
    let on_wheel = Closure::<dyn FnMut(WheelEvent)>::new(move |ev: WheelEvent| {
        ev.prevent_default();
        if let Err(err) = state.borrow_mut().zoom(ev.delta_y()) {
            log::error!("crop zoom failed: {err:?}");
        }
    });
    container.set_onwheel(Some(on_wheel.as_ref().unchecked_ref()));
    on_wheel.forget();

    Ok(widget)
}

fn button(
    doc: &Document,
    session: &Session,
    spec: ButtonSpec,
) -> Result<HtmlButtonElement, JsValue> {
    let button: HtmlButtonElement = doc.create_element("button")?.dyn_into()?;
    button.set_class_name(spec.class_name());
    button.set_text_content(Some(spec.label));

    let session = session.clone();
    let action = spec.action;
    let onclick = Closure::<dyn FnMut()>::new(move || on_click(&session, action));
    button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
    Ok(button)
}

fn on_click(session: &Session, action: EditorAction) {
    let session = session.clone();
    wasm_bindgen_futures::spawn_local(async move {
        // Failures are already logged by the session
        let _ = session.dispatch(action).await;
    });
}
