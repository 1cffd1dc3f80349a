//! Notification banners
//!
//! Banners go into `#notification-container`, which is created on first use.
//! Each one fades after [`Timing::dismiss_after_ms`] and leaves the DOM
//! [`Timing::fade_ms`] later. The close button removes it at once.
//!
//! The page has one notification region, so every caller goes through the
//! same [`shared_notifier`]; banner ids are unique per page.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::timers::callback::Timeout;
use leads_core::{NotificationStack, Severity, Timing};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use leads_core::LeadsError;

use crate::dom::{self, query_all, set_class};

pub const CONTAINER_ID: &str = "notification-container";
pub const CLOSE_SELECTOR: &str = ".notification-close";
const FLASH_SELECTOR: &str = ".flash-message";
const ID_ATTR: &str = "data-notification-id";

thread_local! {
    static SHARED: RefCell<Option<Notifier>> = const { RefCell::new(None) };
}

/// The page-wide notifier, created with default timing on first use
pub fn shared_notifier() -> Result<Notifier, LeadsError> {
    SHARED.with(|slot| {
        if let Some(existing) = slot.borrow().as_ref() {
            return Ok(existing.clone());
        }
        let notifier = Notifier::new(dom::document()?, Timing::default());
        *slot.borrow_mut() = Some(notifier.clone());
        Ok(notifier)
    })
}

struct Inner {
    document: Document,
    timing: Cell<Timing>,
    stack: RefCell<NotificationStack>,
}

/// Handle to the page's notification region; clones share state
#[derive(Clone)]
pub struct Notifier {
    inner: Rc<Inner>,
}

impl Notifier {
    pub fn new(document: Document, timing: Timing) -> Self {
        Self {
            inner: Rc::new(Inner {
                document,
                timing: Cell::new(timing),
                stack: RefCell::new(NotificationStack::new()),
            }),
        }
    }

    /// Applies to banners shown from now on
    pub fn set_timing(&self, timing: Timing) {
        self.inner.timing.set(timing);
    }

    /// Number of banners currently shown
    pub fn len(&self) -> usize {
        self.inner.stack.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.stack.borrow().is_empty()
    }

    fn container(&self) -> Result<Element, JsValue> {
        let document = &self.inner.document;
        if let Some(existing) = document.get_element_by_id(CONTAINER_ID) {
            return Ok(existing);
        }
        let container = document.create_element("div")?;
        container.set_id(CONTAINER_ID);
        container.set_class_name("notification-container");
        container.set_attribute("aria-live", "polite")?;
        dom::body(document)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .append_child(&container)?;
        Ok(container)
    }

    /// Append a banner and schedule its removal. Returns the banner id.
    pub fn show(&self, message: &str, severity: Severity) -> Result<u64, JsValue> {
        let container = self.container()?;
        let document = &self.inner.document;

        let banner = document.create_element("div")?;
        banner.set_class_name(&severity.class_name());
        let role = match severity {
            Severity::Error => "alert",
            Severity::Success => "status",
        };
        banner.set_attribute("role", role)?;

        let text = document.create_element("span")?;
        text.set_class_name("notification-message");
        text.set_text_content(Some(message));
        banner.append_child(&text)?;

        let close = document.create_element("button")?;
        close.set_class_name("notification-close");
        close.set_attribute("type", "button")?;
        close.set_attribute("aria-label", "Dismiss")?;
        close.set_text_content(Some("\u{00d7}"));
        banner.append_child(&close)?;

        container.append_child(&banner)?;

        let id = self.inner.stack.borrow_mut().push(message, severity).id;
        if let Err(e) = banner.set_attribute(ID_ATTR, &id.to_string()) {
            self.inner.stack.borrow_mut().remove(id);
            banner.remove();
            return Err(e);
        }
        self.schedule(id, banner);
        Ok(id)
    }

    /// Start the fade/remove timers for a banner already in the DOM
    fn schedule(&self, id: u64, banner: Element) {
        let weak = Rc::downgrade(&self.inner);
        let timing = self.inner.timing.get();

        Timeout::new(timing.dismiss_after_ms, move || {
            if !is_live(&weak, id) {
                return;
            }
            set_class(&banner, "fade-out", true);

            Timeout::new(timing.fade_ms, move || {
                if let Some(inner) = weak.upgrade() {
                    Notifier { inner }.dismiss(id);
                }
            })
            .forget();
        })
        .forget();
    }

    /// Remove a banner immediately. Returns false if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let removed = self.inner.stack.borrow_mut().remove(id);
        let selector = format!("[{}=\"{}\"]", ID_ATTR, id);
        if let Ok(Some(el)) = self.inner.document.query_selector(&selector) {
            el.remove();
        }
        removed
    }

    /// Put server-rendered flash messages on the same auto-dismiss schedule.
    /// Severity comes from `data-severity`, else from an `error` class.
    pub fn adopt_flash_messages(&self) -> usize {
        let mut adopted = 0;
        for flash in query_all(&self.inner.document, FLASH_SELECTOR) {
            if flash.has_attribute(ID_ATTR) {
                continue;
            }
            let severity = match flash.get_attribute("data-severity") {
                Some(raw) => Severity::parse(&raw),
                None if flash.class_list().contains("error")
                    || flash.class_list().contains("flash-error") =>
                {
                    Severity::Error
                }
                None => Severity::Success,
            };
            let message = flash.text_content().unwrap_or_default();
            let id = self
                .inner
                .stack
                .borrow_mut()
                .push(message.trim(), severity)
                .id;
            if flash.set_attribute(ID_ATTR, &id.to_string()).is_err() {
                self.inner.stack.borrow_mut().remove(id);
                continue;
            }
            self.schedule(id, flash);
            adopted += 1;
        }
        adopted
    }
}

/// Id of the banner containing `element` (e.g. its close button)
pub fn banner_id(element: &Element) -> Option<u64> {
    element
        .closest(&format!("[{}]", ID_ATTR))
        .ok()
        .flatten()
        .and_then(|banner| banner.get_attribute(ID_ATTR))
        .and_then(|id| id.parse().ok())
}

fn is_live(weak: &Weak<Inner>, id: u64) -> bool {
    weak.upgrade()
        .map(|inner| inner.stack.borrow().contains(id))
        .unwrap_or(false)
}
