//! Table/cards toggle
//!
//! Triggers are `.view-btn[data-view]`; each view's container is `#<name>-view`
//! or `.view-content[data-view="<name>"]`. The `active` class marks the
//! selected pair and nothing is persisted across reloads.

use std::cell::RefCell;

use leads_core::ViewSet;
use web_sys::{Document, Element};

use crate::dom::{query_all, same_node, set_class};

pub const TRIGGER_SELECTOR: &str = ".view-btn[data-view]";
const ACTIVE: &str = "active";

pub struct ViewSwitcher {
    views: RefCell<ViewSet>,
    triggers: Vec<(String, Element)>,
    containers: Vec<(String, Element)>,
}

impl ViewSwitcher {
    /// Bind to the page's view triggers; `None` when there are none
    ///
    /// The initially active trigger wins over `default_view`.
    pub fn mount(document: &Document, default_view: &str) -> Option<Self> {
        let triggers: Vec<(String, Element)> = query_all(document, TRIGGER_SELECTOR)
            .into_iter()
            .filter_map(|el| el.get_attribute("data-view").map(|name| (name, el)))
            .collect();

        let names: Vec<String> = triggers.iter().map(|(name, _)| name.clone()).collect();
        let initial = triggers
            .iter()
            .find(|(_, el)| el.class_list().contains(ACTIVE))
            .map(|(name, _)| name.as_str())
            .unwrap_or(default_view);
        let views = ViewSet::new(names.iter().cloned(), initial)?;

        let mut containers = Vec::new();
        for name in views.views() {
            if let Some(el) = document.get_element_by_id(&format!("{}-view", name)) {
                containers.push((name.clone(), el));
            }
            let selector = format!(".view-content[data-view=\"{}\"]", name);
            for el in query_all(document, &selector) {
                if !containers.iter().any(|(_, c)| same_node(c, &el)) {
                    containers.push((name.clone(), el));
                }
            }
        }

        let switcher = Self {
            views: RefCell::new(views),
            triggers,
            containers,
        };
        switcher.apply();
        Some(switcher)
    }

    pub fn active(&self) -> String {
        self.views.borrow().active().to_string()
    }

    /// Activate `name`; unknown names are ignored
    pub fn activate(&self, name: &str) -> bool {
        let changed = self.views.borrow_mut().activate(name);
        if changed {
            self.apply();
        }
        changed
    }

    fn apply(&self) {
        let views = self.views.borrow();
        for (name, el) in &self.triggers {
            let on = views.is_active(name);
            set_class(el, ACTIVE, on);
            let _ = el.set_attribute("aria-pressed", if on { "true" } else { "false" });
        }
        for (name, el) in &self.containers {
            set_class(el, ACTIVE, views.is_active(name));
        }
    }
}
