//! gridfocus - keyboard focus navigation for data grids
//!
//! Moves a single focus cell around a grid of rows and cells the way a
//! spreadsheet does:
//! - Arrow keys skip empty cells in the direction of travel
//! - Page Up/Down jump a viewport at a time and report the scroll offset
//! - Home/End within a row, Ctrl+Home/End across the whole grid
//! - Focus position survives row insertion and removal
//!
//! The navigation core is plain Rust and runs against any [`host::GridHost`].
//! On `wasm32` the `GridFocus` type binds it to a DOM grid element.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridFocus } from 'gridfocus';
//! await init();
//! const focus = new GridFocus(document.querySelector('[role="grid"]'));
//! focus.setGenerateHeader('sticky');
//! focus.setRowsData(rows);
//! // after adding or removing row elements:
//! focus.rowsChanged();
//! ```

pub mod error;
pub mod grid;
pub mod host;
pub mod layout;
pub mod nav;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::GridFocus;

pub use types::*;

/// Column definitions generated from the keys of one row object.
///
/// # Errors
/// Returns an error if the result cannot be converted to a JS value.
#[wasm_bindgen(js_name = "generateColumns")]
pub fn generate_columns_js(row: JsValue) -> Result<JsValue, JsValue> {
    let row: serde_json::Value = serde_wasm_bindgen::from_value(row)
        .map_err(|e| JsValue::from_str(&format!("Deserialization error: {e}")))?;
    serde_wasm_bindgen::to_value(&layout::generate_columns(&row))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// `grid-template-columns` value giving each column definition an equal share.
///
/// # Errors
/// Returns an error if `definitions` is not an array of column definitions.
#[wasm_bindgen(js_name = "generateTemplateColumns")]
pub fn generate_template_columns_js(definitions: JsValue) -> Result<String, JsValue> {
    let definitions: Vec<ColumnDefinition> = serde_wasm_bindgen::from_value(definitions)
        .map_err(|e| JsValue::from_str(&format!("Deserialization error: {e}")))?;
    Ok(layout::generate_template_columns(&definitions))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
