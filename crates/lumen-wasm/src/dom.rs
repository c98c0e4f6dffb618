//! Browser plumbing: asset fetches, object URLs and anchor downloads.

use js_sys::{Array, Uint8Array};
use lumen_core::blob::ImageBlob;
use lumen_core::editor::{EditorHost, HostError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Response, Url, Window};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// GET `url` and return the response body.
pub(crate) async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let response: Response = JsFuture::from(window()?.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "GET {url} failed with status {}",
            response.status()
        )));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

fn to_js_blob(blob: &ImageBlob) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(blob.bytes()));
    let options = BlobPropertyBag::new();
    options.set_type(blob.mime());
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// Click a hidden `<a download>` pointing at `url`.
fn click_download(file_name: &str, url: &str) -> Result<(), JsValue> {
    let doc = document()?;
    let anchor: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    anchor.set_attribute("style", "display:none;")?;

    let body = doc
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    Ok(())
}

fn host_error(err: JsValue) -> HostError {
    HostError(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// [`EditorHost`] backed by the page.
///
/// Object URLs live for the page lifetime; superseded crop results are not
/// revoked.
#[derive(Debug, Default)]
pub(crate) struct BrowserHost;

impl EditorHost for BrowserHost {
    fn create_object_url(&mut self, blob: &ImageBlob) -> Result<String, HostError> {
        let js_blob = to_js_blob(blob).map_err(host_error)?;
        Url::create_object_url_with_blob(&js_blob).map_err(host_error)
    }

    fn download(&mut self, file_name: &str, url: &str) -> Result<(), HostError> {
        log::info!("downloading {file_name}");
        click_download(file_name, url).map_err(host_error)
    }
}
