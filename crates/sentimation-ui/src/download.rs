use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::HtmlAnchorElement;

/// Starts a browser download by clicking a detached anchor.
pub fn trigger_download(
  href: &str,
  file_name: &str
) -> Result<(), JsValue> {
  let document = web_sys::window()
    .and_then(|window| window.document())
    .ok_or_else(|| {
      JsValue::from_str("no document")
    })?;
  let body = document.body().ok_or_else(
    || JsValue::from_str("no body")
  )?;

  let anchor: HtmlAnchorElement = document
    .create_element("a")?
    .dyn_into()?;
  anchor.set_href(href);
  anchor.set_download(file_name);
  anchor.set_attribute("hidden", "")?;

  body.append_child(&anchor)?;
  anchor.click();
  body.remove_child(&anchor)?;

  tracing::info!(
    href,
    file_name,
    "download triggered"
  );
  Ok(())
}
