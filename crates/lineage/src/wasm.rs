//! WebAssembly bindings for the browser renderer
//!
//! The renderer keeps the family document and the collapsed-generation map
//! as plain JS objects; both cross the boundary as JSON strings, and layouts
//! come back the same way.

use wasm_bindgen::prelude::*;

use crate::core::TreeLayout;
use crate::family::HiddenGenerations;
use crate::layout::{generate_tree_layout as layout_tree, get_boundaries as boundaries_of};

/// Initialize WASM module
///
/// Sets up panic hooks and logging to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Lay out a family document
///
/// * `tree` - the family document as JSON (`null` for no tree)
/// * `hidden` - the `{ personId: bool }` map as JSON; empty string for none
///
/// Returns `{nodes, connections, warnings}` as JSON.
#[wasm_bindgen(js_name = generateTreeLayout)]
pub fn generate_tree_layout(tree: &str, hidden: &str) -> Result<String, JsValue> {
    let tree = crate::parse_tree(tree).map_err(js_error)?;
    let hidden = if hidden.trim().is_empty() {
        HiddenGenerations::new()
    } else {
        HiddenGenerations::from_json(hidden).map_err(js_error)?
    };

    let layout = layout_tree(tree.as_ref(), &hidden).map_err(js_error)?;
    serde_json::to_string(&layout).map_err(js_error)
}

/// Padded viewport of a layout previously returned by `generateTreeLayout`
#[wasm_bindgen(js_name = getBoundaries)]
pub fn get_boundaries(layout: &str) -> Result<String, JsValue> {
    let layout: TreeLayout = serde_json::from_str(layout).map_err(js_error)?;
    serde_json::to_string(&boundaries_of(&layout)).map_err(js_error)
}
