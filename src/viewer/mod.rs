//! `GridFocus` - the WASM-exported entry point for a DOM data grid.
//!
//! This module provides the `GridFocus` struct that handles:
//! - Binding a grid element and its `role="row"` children as the grid host
//! - Keyboard navigation (arrows, Page Up/Down, Home/End, Ctrl+Home/End)
//! - Tracking the focus cell as focus moves around inside the grid
//! - Column definitions, generated header, and row layout updates
//!
//! Event listeners are registered on the grid element when the object is
//! created and removed again when it is dropped.

mod dom_host;
mod events;
mod schedule;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{FocusEvent, HtmlElement, KeyboardEvent};

use crate::error::GridFocusError;
use crate::grid::DataGrid;
use crate::types::{ColumnDefinition, GenerateHeaderOptions};
use dom_host::DomHost;

/// State shared between the exported object and its event listeners.
pub(crate) struct SharedState {
    pub(crate) grid: DataGrid,
    pub(crate) host: DomHost,
    frame_closure: Option<Closure<dyn FnMut()>>,
    frame_pending: bool,
}

/// Keyboard focus navigation for one grid element.
#[wasm_bindgen]
pub struct GridFocus {
    state: Rc<RefCell<SharedState>>,
    element: HtmlElement,
    key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    focus_closures: Vec<(&'static str, Closure<dyn FnMut(FocusEvent)>)>,
}

#[wasm_bindgen]
impl GridFocus {
    /// Bind to a grid element and start handling its keyboard and focus events.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement) -> Result<GridFocus, JsValue> {
        console_error_panic_hook::set_once();

        let state = Rc::new(RefCell::new(SharedState {
            grid: DataGrid::new(),
            host: DomHost::new(element.clone()),
            frame_closure: None,
            frame_pending: false,
        }));

        let key_closure = {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                if event.default_prevented() {
                    return;
                }
                let ctrl = event.ctrl_key() || event.meta_key();
                if Self::internal_key_down(&state, &event.key(), ctrl) {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);
            element
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(|e| GridFocusError::Dom(format!("keydown listener: {e:?}")))?;
            Some(closure)
        };

        let mut focus_closures = Vec::new();
        let handlers: [(&'static str, fn(&Rc<RefCell<SharedState>>, &FocusEvent)); 3] = [
            ("focus", Self::internal_focus),
            ("focusin", Self::internal_focus_in),
            ("focusout", Self::internal_focus_out),
        ];
        for (event_name, handler) in handlers {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |event: FocusEvent| {
                handler(&state, &event);
            }) as Box<dyn FnMut(FocusEvent)>);
            element
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
                .map_err(|e| GridFocusError::Dom(format!("{event_name} listener: {e:?}")))?;
            focus_closures.push((event_name, closure));
        }

        element.set_tab_index(0);
        {
            let s = &mut *state.borrow_mut();
            s.grid.connect(&mut s.host);
        }
        Self::schedule_update(&state);

        Ok(GridFocus {
            state,
            element,
            key_closure,
            focus_closures,
        })
    }

    /// Handle a key press (public API). Returns `true` when consumed.
    #[wasm_bindgen(js_name = "onKeyDown")]
    pub fn on_key_down(&mut self, key: &str, ctrl: bool) -> bool {
        Self::internal_key_down(&self.state, key, ctrl)
    }

    /// Call after rows were added to or removed from the grid element.
    #[wasm_bindgen(js_name = "rowsChanged")]
    pub fn rows_changed(&mut self) {
        self.with_grid(|grid, host| grid.on_rows_structure_changed(host));
    }

    /// Call after `count` row elements were inserted before row `index`.
    #[wasm_bindgen(js_name = "rowsInserted")]
    pub fn rows_inserted(&mut self, index: usize, count: usize) {
        self.with_grid(|grid, host| grid.on_rows_inserted(host, index, count));
    }

    /// Call after `count` row elements starting at row `index` were removed.
    #[wasm_bindgen(js_name = "rowsRemoved")]
    pub fn rows_removed(&mut self, index: usize, count: usize) {
        self.with_grid(|grid, host| grid.on_rows_removed(host, index, count));
    }

    /// Set column definitions (`[{columnDataKey, gridColumn?, title?}]` or `null`).
    #[wasm_bindgen(js_name = "setColumnDefinitions")]
    pub fn set_column_definitions(&mut self, definitions: JsValue) -> Result<(), JsValue> {
        let definitions: Option<Vec<ColumnDefinition>> = if definitions.is_null_or_undefined() {
            None
        } else {
            Some(serde_wasm_bindgen::from_value(definitions).map_err(GridFocusError::from)?)
        };
        self.with_grid(|grid, host| grid.set_column_definitions(host, definitions));
        Ok(())
    }

    #[wasm_bindgen(js_name = "columnDefinitions")]
    pub fn column_definitions(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(&s.grid.column_definitions())
            .map_err(|e| GridFocusError::from(e).into())
    }

    /// Set the row data; columns are generated from the first row if none
    /// are defined.
    #[wasm_bindgen(js_name = "setRowsData")]
    pub fn set_rows_data(&mut self, rows: JsValue) -> Result<(), JsValue> {
        let rows: Vec<serde_json::Value> =
            serde_wasm_bindgen::from_value(rows).map_err(GridFocusError::from)?;
        self.with_grid(|grid, host| grid.set_rows_data(host, rows));
        Ok(())
    }

    /// `none`, `default` or `sticky`.
    #[wasm_bindgen(js_name = "setGenerateHeader")]
    pub fn set_generate_header(&mut self, value: &str) -> Result<(), JsValue> {
        let options = GenerateHeaderOptions::from_attr(value).ok_or_else(|| {
            GridFocusError::JsValue(format!("unknown generate-header value {value:?}"))
        })?;
        self.with_grid(|grid, host| grid.set_generate_header(host, options));
        Ok(())
    }

    #[wasm_bindgen(js_name = "setGridTemplateColumns")]
    pub fn set_grid_template_columns(&mut self, template: Option<String>) {
        self.with_grid(|grid, host| grid.set_grid_template_columns(host, template));
    }

    #[wasm_bindgen(getter, js_name = "focusRowIndex")]
    pub fn focus_row_index(&self) -> usize {
        self.state.borrow().grid.focus_position().row_index
    }

    #[wasm_bindgen(setter, js_name = "focusRowIndex")]
    pub fn set_focus_row_index(&mut self, row: usize) {
        self.with_grid(|grid, host| grid.set_focus_row_index(host, row));
    }

    #[wasm_bindgen(getter, js_name = "focusColumnIndex")]
    pub fn focus_column_index(&self) -> usize {
        self.state.borrow().grid.focus_position().column_index
    }

    #[wasm_bindgen(setter, js_name = "focusColumnIndex")]
    pub fn set_focus_column_index(&mut self, column: usize) {
        self.with_grid(|grid, host| grid.set_focus_column_index(host, column));
    }

    /// Stop handling updates and remove the generated header.
    pub fn disconnect(&mut self) {
        self.with_grid(|grid, host| grid.disconnect(host));
    }
}

impl GridFocus {
    fn with_grid(&mut self, f: impl FnOnce(&mut DataGrid, &mut DomHost)) {
        {
            let s = &mut *self.state.borrow_mut();
            f(&mut s.grid, &mut s.host);
        }
        Self::schedule_update(&self.state);
    }
}

impl Drop for GridFocus {
    fn drop(&mut self) {
        if let Some(closure) = self.key_closure.take() {
            let _ = self
                .element
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
        for (event_name, closure) in self.focus_closures.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
        }
        if let Ok(mut guard) = self.state.try_borrow_mut() {
            let s = &mut *guard;
            s.grid.disconnect(&mut s.host);
        }
    }
}
