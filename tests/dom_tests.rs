//! Browser tests for `GridFocus`
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use gridfocus::GridFocus;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

const GRID_HTML: &str = r#"
<div role="row"><div role="gridcell"><span>a</span></div><div role="gridcell"><span>b</span></div></div>
<div role="row"><div role="gridcell"><span>c</span></div><div role="gridcell"></div></div>
<div role="row"><div role="gridcell"><span>e</span></div><div role="gridcell"><span>f</span></div></div>
"#;

fn grid_element() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    element.set_attribute("role", "grid").unwrap();
    element.set_inner_html(GRID_HTML);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn test_arrow_down_skips_empty_cell() {
    let element = grid_element();
    let mut focus = GridFocus::new(element.clone()).unwrap();
    focus.set_generate_header("none").unwrap();

    focus.set_focus_column_index(1);
    assert!(focus.on_key_down("ArrowDown", false));
    assert_eq!(focus.focus_row_index(), 2);
    assert_eq!(focus.focus_column_index(), 1);

    assert!(focus.on_key_down("Home", true));
    assert_eq!(focus.focus_row_index(), 0);
    assert_eq!(focus.focus_column_index(), 0);

    assert!(!focus.on_key_down("Enter", false));
    element.remove();
}

#[wasm_bindgen_test]
fn test_generated_header_is_not_a_row() {
    let element = grid_element();
    let mut focus = GridFocus::new(element.clone()).unwrap();
    let header = element.query_selector("[data-generated-header]").unwrap();
    assert!(header.is_some());

    assert!(focus.on_key_down("ArrowDown", false));
    assert_eq!(focus.focus_row_index(), 1);

    focus.disconnect();
    assert!(element
        .query_selector("[data-generated-header]")
        .unwrap()
        .is_none());
    element.remove();
}
