//! Event dispatch for the dashboard
//!
//! Document-level listeners (click, change, keydown) classify each event into a
//! [`UiAction`] and route it to the component that owns it.

use std::rc::Rc;

use leads_core::Severity;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget};

use crate::export::{self, CsvExporter};
use crate::filters::{self, FilterBar};
use crate::lead_modal::{self, LeadModal};
use crate::notifications::{self, Notifier};
use crate::view_switcher::{self, ViewSwitcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SwitchView(String),
    OpenLead(String),
    CloseModal,
    DismissNotification(u64),
    ExportCsv,
    Filter { key: String, value: String },
    ClearFilters,
}

impl UiAction {
    /// Triggers may be links; suppress navigation for the ones we handle
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            UiAction::SwitchView(_)
                | UiAction::OpenLead(_)
                | UiAction::ExportCsv
                | UiAction::ClearFilters
        )
    }
}

/// Keyboard shortcuts
pub fn key_action(key: &str) -> Option<UiAction> {
    match key {
        "Escape" | "Esc" => Some(UiAction::CloseModal),
        _ => None,
    }
}

fn matching(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

/// The page's interactive components, built once at startup
pub struct Components {
    pub notifier: Notifier,
    pub views: Option<ViewSwitcher>,
    pub modal: Option<LeadModal>,
    pub filters: Option<FilterBar>,
    pub exporter: CsvExporter,
}

impl Components {
    /// Classify a click by its target
    pub fn click_action(&self, target: Option<EventTarget>) -> Option<UiAction> {
        if let Some(modal) = &self.modal {
            if modal.is_backdrop(target.as_ref()) {
                return Some(UiAction::CloseModal);
            }
        }

        let el = target?.dyn_into::<Element>().ok()?;

        if let Some(close) = matching(&el, notifications::CLOSE_SELECTOR) {
            return notifications::banner_id(&close).map(UiAction::DismissNotification);
        }
        if let Some(btn) = matching(&el, view_switcher::TRIGGER_SELECTOR) {
            return btn.get_attribute("data-view").map(UiAction::SwitchView);
        }
        if let Some(btn) = matching(&el, lead_modal::TRIGGER_SELECTOR) {
            return btn
                .get_attribute("data-lead-id")
                .filter(|id| !id.trim().is_empty())
                .map(UiAction::OpenLead);
        }
        if matching(&el, lead_modal::CLOSE_SELECTOR).is_some() {
            return Some(UiAction::CloseModal);
        }
        if matching(&el, export::TRIGGER_SELECTOR).is_some() {
            return Some(UiAction::ExportCsv);
        }
        if matching(&el, filters::CLEAR_SELECTOR).is_some() {
            return Some(UiAction::ClearFilters);
        }
        None
    }

    /// Classify a `change` event; only filter controls produce an action
    pub fn change_action(&self, target: Option<EventTarget>) -> Option<UiAction> {
        let el = target?.dyn_into::<Element>().ok()?;
        if !el.matches(filters::CONTROL_SELECTOR).unwrap_or(false) {
            return None;
        }
        filters::control_value(&el).map(|(key, value)| UiAction::Filter { key, value })
    }

    pub fn dispatch(&self, action: UiAction) {
        match action {
            UiAction::SwitchView(name) => {
                if let Some(views) = &self.views {
                    views.activate(&name);
                }
            }
            UiAction::OpenLead(id) => match &self.modal {
                Some(modal) => modal.open(&id),
                None => console_error!("No #{} on this page", lead_modal::MODAL_ID),
            },
            UiAction::CloseModal => {
                if let Some(modal) = &self.modal {
                    modal.close();
                }
            }
            UiAction::DismissNotification(id) => {
                self.notifier.dismiss(id);
            }
            UiAction::ExportCsv => match self.exporter.download() {
                Ok(count) => console_log!("Exported {} leads", count),
                Err(e) => {
                    console_error!("CSV export failed: {:?}", e);
                    let _ = self
                        .notifier
                        .show("Could not export leads. Please try again.", Severity::Error);
                }
            },
            UiAction::Filter { key, value } => {
                if let Some(filters) = &self.filters {
                    let shown = filters.set(&key, &value);
                    console_log!("Filter {} = {:?}: {} leads shown", key, value, shown);
                }
            }
            UiAction::ClearFilters => {
                if let Some(filters) = &self.filters {
                    filters.clear();
                }
            }
        }
    }
}

pub type SharedComponents = Rc<Components>;
