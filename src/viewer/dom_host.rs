//! Grid host backed by the DOM.
//!
//! Rows are the direct children of the grid element with `role="row"`
//! (the generated header excluded). Cells are the elements inside a row
//! carrying one of the cell roles. A cell is occupied when it has child
//! elements.

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node, NodeList, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::error::{GridFocusError, Result};
use crate::grid::DataGridRow;
use crate::host::GridHost;
use crate::layout::{RowGeometry, Viewport};
use crate::nav::GridSnapshot;

const ROW_SELECTOR: &str = r#":scope > [role="row"]:not([data-generated-header])"#;
const CELL_SELECTOR: &str =
    r#"[role="cell"], [role="gridcell"], [role="columnheader"], [role="rowheader"]"#;
const HEADER_MARKER: &str = "data-generated-header";

fn scroll_top_f64(element: &HtmlElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| f64::from(element.scroll_top()))
}

fn query_all(root: &Element, selector: &str) -> Option<NodeList> {
    root.query_selector_all(selector).ok()
}

fn html_item(list: &NodeList, index: usize) -> Option<HtmlElement> {
    let index = u32::try_from(index).ok()?;
    list.item(index)?.dyn_into::<HtmlElement>().ok()
}

fn list_len(list: &NodeList) -> usize {
    usize::try_from(list.length()).unwrap_or(0)
}

pub(crate) struct DomHost {
    element: HtmlElement,
    header: Option<HtmlElement>,
    update_requested: bool,
}

impl DomHost {
    pub(crate) fn new(element: HtmlElement) -> Self {
        Self {
            element,
            header: None,
            update_requested: false,
        }
    }

    pub(crate) fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub(crate) fn take_update_request(&mut self) -> bool {
        std::mem::take(&mut self.update_requested)
    }

    fn rows(&self) -> Option<NodeList> {
        query_all(&self.element, ROW_SELECTOR)
    }

    fn row(&self, row: usize) -> Option<HtmlElement> {
        html_item(&self.rows()?, row)
    }

    fn cells(&self, row: usize) -> Option<NodeList> {
        query_all(&self.row(row)?, CELL_SELECTOR)
    }

    fn cell(&self, row: usize, column: usize) -> Option<HtmlElement> {
        html_item(&self.cells(row)?, column)
    }

    /// Whether `node` is the grid element or lies inside it.
    pub(crate) fn contains(&self, node: Option<&Node>) -> bool {
        node.is_some() && self.element.contains(node)
    }

    /// Row and column of the cell containing `node`.
    pub(crate) fn locate(&self, node: &Node) -> Option<(usize, usize)> {
        let rows = self.rows()?;
        let row = (0..list_len(&rows))
            .find(|&i| html_item(&rows, i).is_some_and(|r| r.contains(Some(node))))?;
        let cells = self.cells(row)?;
        let column = (0..list_len(&cells))
            .find(|&i| html_item(&cells, i).is_some_and(|c| c.contains(Some(node))))?;
        Some((row, column))
    }

    fn create_header(&self, header: &DataGridRow) -> Result<HtmlElement> {
        let document = self
            .element
            .owner_document()
            .ok_or_else(|| GridFocusError::Dom("grid element has no document".into()))?;
        let dom_err = |e: JsValue| GridFocusError::Dom(format!("{e:?}"));

        let row = document
            .create_element("div")
            .map_err(dom_err)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GridFocusError::Dom("header row is not an HTML element".into()))?;
        row.set_attribute("role", "row").map_err(dom_err)?;
        row.set_attribute(HEADER_MARKER, "").map_err(dom_err)?;
        if let Some(class) = header.row_type.css_class() {
            row.set_class_name(class);
        }
        if !header.grid_template_columns.is_empty() {
            row.style()
                .set_property("grid-template-columns", &header.grid_template_columns)
                .map_err(dom_err)?;
        }

        for (index, column) in header.column_definitions.iter().flatten().enumerate() {
            let cell = document
                .create_element("div")
                .map_err(dom_err)?
                .dyn_into::<HtmlElement>()
                .map_err(|_| GridFocusError::Dom("header cell is not an HTML element".into()))?;
            cell.set_attribute("role", "columnheader").map_err(dom_err)?;
            cell.set_attribute("aria-colindex", &(index + 1).to_string())
                .map_err(dom_err)?;
            let grid_column = column
                .grid_column
                .clone()
                .unwrap_or_else(|| (index + 1).to_string());
            cell.style()
                .set_property("grid-column", &grid_column)
                .map_err(dom_err)?;
            cell.set_text_content(Some(column.header_text()));
            row.append_child(&cell).map_err(dom_err)?;
        }
        Ok(row)
    }
}

impl GridSnapshot for DomHost {
    fn row_count(&self) -> usize {
        self.rows().map_or(0, |rows| list_len(&rows))
    }

    fn cell_count(&self, row: usize) -> usize {
        self.cells(row).map_or(0, |cells| list_len(&cells))
    }

    fn is_occupied(&self, row: usize, column: usize) -> bool {
        self.cell(row, column)
            .is_some_and(|cell| cell.child_element_count() > 0)
    }

    fn row_geometry(&self, row: usize) -> Option<RowGeometry> {
        let row = self.row(row)?;
        Some(RowGeometry::new(
            f64::from(row.offset_top()),
            f64::from(row.offset_height()),
        ))
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            scroll_top_f64(&self.element),
            f64::from(self.element.client_height()),
            f64::from(self.element.scroll_height()),
        )
    }
}

impl GridHost for DomHost {
    fn set_scroll_top(&mut self, offset: f64) {
        let _ = Reflect::set(
            self.element.as_ref(),
            &JsValue::from_str("scrollTop"),
            &JsValue::from_f64(offset),
        );
    }

    fn focus_cell(&mut self, row: usize, column: usize) {
        if let Some(cell) = self.cell(row, column) {
            let _ = cell.focus();
        }
    }

    fn scroll_cell_into_view(&mut self, row: usize, column: usize) {
        if let Some(cell) = self.cell(row, column) {
            let options = ScrollIntoViewOptions::new();
            options.set_block(ScrollLogicalPosition::Center);
            options.set_inline(ScrollLogicalPosition::Center);
            cell.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn contains_focus(&self) -> bool {
        let active = self
            .element
            .owner_document()
            .and_then(|document| document.active_element());
        active.is_some_and(|active| {
            let node: &Node = active.as_ref();
            self.contains(Some(node))
        })
    }

    fn set_tab_index(&mut self, index: i32) {
        self.element.set_tab_index(index);
    }

    fn install_header(&mut self, header: &DataGridRow) {
        match self.create_header(header) {
            Ok(row) => {
                let first = self.element.first_child();
                if self.element.insert_before(&row, first.as_ref()).is_ok() {
                    self.header = Some(row);
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not create generated header"),
        }
    }

    fn remove_header(&mut self) {
        if let Some(header) = self.header.take() {
            header.remove();
        }
    }

    fn header_height(&self) -> Option<f64> {
        self.header
            .as_ref()
            .map(|header| f64::from(header.client_height()))
    }

    fn apply_row_layout(&mut self, row: usize, layout: &DataGridRow) {
        let Some(element) = self.row(row) else {
            return;
        };
        let _ = element.set_attribute("aria-rowindex", &(layout.row_index + 1).to_string());
        if !layout.grid_template_columns.is_empty() {
            let _ = element
                .style()
                .set_property("grid-template-columns", &layout.grid_template_columns);
        }
    }

    fn request_update(&mut self) {
        self.update_requested = true;
    }
}
