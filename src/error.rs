//! Structured error types for gridfocus.
//!
//! Navigation itself never fails: out-of-range indices are clamped and an
//! empty grid resolves to the origin. These errors only surface at the crate
//! boundary, where data comes in from JavaScript, JSON fixtures, or the DOM.

/// All errors that can occur while binding a grid to its host.
#[derive(Debug, thiserror::Error)]
pub enum GridFocusError {
    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value handed in from JavaScript had the wrong shape.
    #[error("Invalid value from JavaScript: {0}")]
    JsValue(String),

    /// Grid fixture is malformed (bad occupancy marker, bad geometry).
    #[error("Invalid grid fixture: {0}")]
    Fixture(String),

    /// A DOM node the host needs is missing.
    #[error("DOM: {0}")]
    Dom(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridFocusError>;

impl From<serde_wasm_bindgen::Error> for GridFocusError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::JsValue(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridFocusError> for wasm_bindgen::JsValue {
    fn from(e: GridFocusError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
