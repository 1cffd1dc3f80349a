//! Lead detail modal bound to `#leadModal`
//!
//! Request lifecycle is driven by [`ModalMachine`]; this component only turns
//! its resolutions into DOM updates.

use std::cell::RefCell;
use std::rc::Rc;

use leads_core::{
    lead_slots, AppConfig, Lead, LeadsError, ModalMachine, ModalState, RequestTicket, Resolution,
    Severity,
};
use wasm_bindgen_futures::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, Node};

use crate::api;
use crate::dom::{set_class, set_scroll_lock};
use crate::notifications::Notifier;

pub const MODAL_ID: &str = "leadModal";
pub const TRIGGER_SELECTOR: &str = ".view-details[data-lead-id]";
pub const CLOSE_SELECTOR: &str = ".close-modal, .modal-close";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading lead details. Please try again.";

const STATUS_SLOT: &str = ".permit-status";

struct Inner {
    document: Document,
    root: Element,
    machine: RefCell<ModalMachine>,
    config: Rc<AppConfig>,
    notifier: Notifier,
}

#[derive(Clone)]
pub struct LeadModal {
    inner: Rc<Inner>,
}

impl LeadModal {
    /// Bind to `#leadModal`; `None` when the page has no modal
    pub fn mount(document: &Document, config: Rc<AppConfig>, notifier: Notifier) -> Option<Self> {
        let root = document.get_element_by_id(MODAL_ID)?;
        let modal = Self {
            inner: Rc::new(Inner {
                document: document.clone(),
                root,
                machine: RefCell::new(ModalMachine::new()),
                config,
                notifier,
            }),
        };
        modal.hide();
        Some(modal)
    }

    pub fn root(&self) -> &Element {
        &self.inner.root
    }

    pub fn state(&self) -> ModalState {
        self.inner.machine.borrow().state().clone()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state(), ModalState::Open { .. })
    }

    /// Click landed on the overlay itself rather than the dialog content
    pub fn is_backdrop(&self, target: Option<&EventTarget>) -> bool {
        target
            .and_then(|t| t.dyn_ref::<Node>())
            .map(|node| self.inner.root.is_same_node(Some(node)))
            .unwrap_or(false)
    }

    /// Request `lead_id` and show it when the response arrives
    pub fn open(&self, lead_id: &str) {
        let ticket = self.inner.machine.borrow_mut().open(lead_id);
        self.sync_state();

        let url = self.inner.config.lead_url(lead_id);
        let modal = self.clone();
        spawn_local(async move {
            let result = api::fetch_lead(&url).await;
            modal.finish(&ticket, result);
        });
    }

    /// Apply the outcome of a detail request
    pub fn finish(&self, ticket: &RequestTicket, result: Result<Lead, LeadsError>) {
        let resolution = match &result {
            Ok(_) => self.inner.machine.borrow_mut().loaded(ticket),
            Err(err) => {
                console_error!("Error fetching lead {}: {}", ticket.lead_id, err);
                self.inner.machine.borrow_mut().failed(ticket)
            }
        };

        match (resolution, result) {
            (Resolution::Render, Ok(lead)) => {
                self.render(&lead);
                self.show();
            }
            (Resolution::ShowError, _) => {
                self.hide();
                if let Err(e) = self.inner.notifier.show(LOAD_ERROR_MESSAGE, Severity::Error) {
                    console_error!("Failed to show notification: {:?}", e);
                }
            }
            (Resolution::Discard, _) => {
                console_log!("Ignoring stale response for lead {}", ticket.lead_id);
            }
            (Resolution::Render, Err(_)) => {}
        }
    }

    /// Close from any state; late responses are discarded
    pub fn close(&self) -> bool {
        let changed = self.inner.machine.borrow_mut().close();
        if changed {
            self.hide();
        }
        changed
    }

    fn render(&self, lead: &Lead) {
        let root = &self.inner.root;
        for (slot, text) in lead_slots(lead, &self.inner.config.locale) {
            if let Ok(Some(el)) = root.query_selector(&format!(".{}", slot)) {
                el.set_text_content(Some(&text));
            }
        }

        if let Ok(Some(badge)) = root.query_selector(STATUS_SLOT) {
            let class = match lead.status() {
                Some(status) => format!("permit-status status-badge {}", status.badge_class()),
                None => "permit-status status-badge".to_string(),
            };
            badge.set_class_name(&class);
        }
    }

    fn show(&self) {
        let root = &self.inner.root;
        set_class(root, "active", true);
        let _ = root.set_attribute("aria-hidden", "false");
        set_scroll_lock(&self.inner.document, true);
        self.sync_state();
    }

    fn hide(&self) {
        let root = &self.inner.root;
        set_class(root, "active", false);
        let _ = root.set_attribute("aria-hidden", "true");
        set_scroll_lock(&self.inner.document, false);
        self.sync_state();
    }

    fn sync_state(&self) {
        let state = match self.inner.machine.borrow().state() {
            ModalState::Closed => "closed",
            ModalState::Loading { .. } => "loading",
            ModalState::Open { .. } => "open",
        };
        let _ = self.inner.root.set_attribute("data-state", state);
    }
}
