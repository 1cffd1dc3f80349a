//! Lead list filters
//!
//! Each `select[data-filter="<key>"]` narrows the table rows and lead cards to
//! those whose `data-<key>` attribute matches. Non-matching items get the
//! `hidden` attribute, which the CSV export also honours.

use std::cell::RefCell;

use leads_core::{FilterSet, FILTER_KEYS};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlSelectElement};

use crate::dom::query_all;

pub const CONTROL_SELECTOR: &str = "select[data-filter]";
pub const CLEAR_SELECTOR: &str = ".clear-filters";
const ITEM_SELECTOR: &str = "#table-view tbody tr, .lead-card";

pub struct FilterBar {
    document: Document,
    filters: RefCell<FilterSet>,
}

impl FilterBar {
    /// Bind to the page's filter controls; `None` when there are none.
    /// Values already selected (e.g. restored from the query string) apply at once.
    pub fn mount(document: &Document) -> Option<Self> {
        let controls = query_all(document, CONTROL_SELECTOR);
        if controls.is_empty() {
            return None;
        }

        let mut filters = FilterSet::new();
        for control in &controls {
            if let Some((key, value)) = control_value(control) {
                filters.set(&key, &value);
            }
        }

        let bar = Self {
            document: document.clone(),
            filters: RefCell::new(filters),
        };
        bar.apply();
        Some(bar)
    }

    /// Set one filter and re-apply. Unknown keys are ignored.
    pub fn set(&self, key: &str, value: &str) -> usize {
        if FILTER_KEYS.contains(&key) && self.filters.borrow_mut().set(key, value) {
            self.apply()
        } else {
            self.visible()
        }
    }

    /// Reset every control and show all items
    pub fn clear(&self) -> usize {
        for control in query_all(&self.document, CONTROL_SELECTOR) {
            if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
                select.set_value("");
            }
        }
        self.filters.borrow_mut().clear_all();
        self.apply()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.filters.borrow().get(key).map(str::to_string)
    }

    /// Number of items currently shown
    pub fn visible(&self) -> usize {
        query_all(&self.document, ITEM_SELECTOR)
            .iter()
            .filter(|el| !el.has_attribute("hidden"))
            .count()
    }

    fn apply(&self) -> usize {
        let filters = self.filters.borrow();
        let mut shown = 0;
        for item in query_all(&self.document, ITEM_SELECTOR) {
            let keep = filters.matches(|key| item.get_attribute(&data_attr(key)));
            if keep {
                let _ = item.remove_attribute("hidden");
                shown += 1;
            } else {
                let _ = item.set_attribute("hidden", "");
            }
        }
        shown
    }
}

/// `(key, selected value)` of a filter control
pub fn control_value(control: &Element) -> Option<(String, String)> {
    let key = control.get_attribute("data-filter")?;
    let value = control.dyn_ref::<HtmlSelectElement>()?.value();
    Some((key, value))
}

fn data_attr(key: &str) -> String {
    format!("data-{}", key.replace('_', "-"))
}
