//! Browser tests for the `Schedule` widget.
//!
//! Run with: wasm-pack test --headless --firefox
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use schedview::Schedule;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

const DOC: &str = r#"{
    "rowLabels": ["9", "10", "11"],
    "columns": [{"id": "a", "label": "A", "link": "/a"}, {"id": "b", "label": "B"}],
    "blocks": [
        {"label": "Long", "main": "talk", "row": 0, "columnId": "a", "height": 2},
        {"main": "Short", "row": 1, "columnId": "a", "height": 1, "enabled": false},
        {"main": "Hidden", "row": 0, "columnId": "b", "height": 1, "visible": false}
    ]
}"#;

fn host() -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document
        .create_element("div")
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn renders_headers_and_visible_blocks() {
    let element = host();
    let mut schedule = Schedule::new(element.clone());
    schedule.load_json(DOC).unwrap();
    schedule.render().unwrap();

    let rows = element.query_selector_all(".schedule_leftheadercell").unwrap();
    assert_eq!(rows.length(), 3);
    let columns = element.query_selector_all(".schedule_topheadercell").unwrap();
    assert_eq!(columns.length(), 2);
    let blocks = element.query_selector_all(".schedule_gridcell").unwrap();
    assert_eq!(blocks.length(), 2);
    let disabled = element.query_selector_all(".schedule_gridcell.disabled").unwrap();
    assert_eq!(disabled.length(), 1);
    assert!(element.query_selector("a[href='/a']").unwrap().is_some());
    assert_eq!(element.style().get_property_value("width").unwrap(), "310px");
}

#[wasm_bindgen_test]
fn rerender_replaces_content() {
    let element = host();
    let mut schedule = Schedule::new(element.clone());
    schedule.load_json(DOC).unwrap();
    schedule.render().unwrap();
    schedule.render().unwrap();
    let blocks = element.query_selector_all(".schedule_gridcell").unwrap();
    assert_eq!(blocks.length(), 2);
}

#[wasm_bindgen_test]
fn rejects_overlong_block() {
    let mut schedule = Schedule::new(host());
    let doc = r#"{"rowLabels": ["9"], "columns": [{"id": "a"}],
                  "blocks": [{"row": 0, "columnId": "a", "height": 2}]}"#;
    assert!(schedule.load_json(doc).is_err());
    assert_eq!(schedule.column_count(), 0);
}
