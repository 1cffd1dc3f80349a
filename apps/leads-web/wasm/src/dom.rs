//! Small DOM helpers shared by the components

use leads_core::LeadsError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub fn document() -> Result<Document, LeadsError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| LeadsError::MissingElement("document".to_string()))
}

pub fn body(document: &Document) -> Result<HtmlElement, LeadsError> {
    document
        .body()
        .ok_or_else(|| LeadsError::MissingElement("body".to_string()))
}

/// All elements under `root` matching `selector`, in document order
pub fn query_all(root: &impl AsRef<web_sys::Node>, selector: &str) -> Vec<Element> {
    let node: &web_sys::Node = root.as_ref();
    let list = if let Some(doc) = node.dyn_ref::<Document>() {
        doc.query_selector_all(selector)
    } else if let Some(el) = node.dyn_ref::<Element>() {
        el.query_selector_all(selector)
    } else {
        return Vec::new();
    };

    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn same_node(a: &Element, b: &Element) -> bool {
    let b: &web_sys::Node = b;
    a.is_same_node(Some(b))
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// Lock or release page scrolling behind an overlay
pub fn set_scroll_lock(document: &Document, locked: bool) {
    if let Some(body) = document.body() {
        let value = if locked { "hidden" } else { "" };
        let _ = body.style().set_property("overflow", value);
    }
}

pub fn is_scroll_locked(document: &Document) -> bool {
    document
        .body()
        .and_then(|b| b.style().get_property_value("overflow").ok())
        .map(|v| v == "hidden")
        .unwrap_or(false)
}

/// Best-effort message from a thrown JS value
pub fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}
