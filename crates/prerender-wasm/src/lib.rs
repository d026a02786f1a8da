//! WASM bindings for prerender.
//!
//! Exposes `render()` to JavaScript via wasm-bindgen. The template is a plain
//! JS value in the same shape as the JSON templates; the style map is an
//! optional object of strings. Returns the HTML string or throws.

use prerender_tree::{StyleMap, Template};
use wasm_bindgen::prelude::*;

/// Render a template to an HTML string.
///
/// `styles` may be `undefined` or `null` when the template has no style
/// references. Throws a JS error on a malformed template, an unknown style
/// key, or an invalid tag or attribute key.
#[wasm_bindgen]
pub fn render(template: JsValue, styles: JsValue) -> Result<String, JsError> {
    let template: Template =
        serde_wasm_bindgen::from_value(template).map_err(|e| JsError::new(&e.to_string()))?;

    let styles = if styles.is_undefined() || styles.is_null() {
        StyleMap::new()
    } else {
        serde_wasm_bindgen::from_value(styles).map_err(|e| JsError::new(&e.to_string()))?
    };

    render_template(&template, &styles).map_err(|e| JsError::new(&e))
}

/// Escape `& < > " '` in a string.
#[wasm_bindgen]
pub fn escape(text: &str) -> String {
    prerender_html::escape(text).into_owned()
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn render_template(template: &Template, styles: &StyleMap) -> Result<String, String> {
    let nodes = template.instantiate(styles).map_err(|e| e.to_string())?;
    prerender_html::serialize_fragment(&nodes).map_err(|e| e.to_string())
}
