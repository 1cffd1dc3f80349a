//! Leads dashboard - browser interaction layer
//!
//! Mounted automatically when the module loads. Each interactive region of the
//! page is an explicit component built once at startup and owning its DOM:
//! - `ViewSwitcher`: table/cards toggle
//! - `LeadModal`: detail view fetched from `GET /api/leads/{id}`
//! - `Notifier`: auto-dismissing banners, including server flash messages
//! - `FilterBar`: project type / location / value range filters
//! - `CsvExporter`: client-side CSV of the rows left visible
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { showNotification } from './pkg/leads_wasm.js';
//!
//! await init();
//! showNotification("Lead submitted successfully!");
//! showNotification("All fields are required!", "error");
//! ```

#[macro_use]
pub mod log;

pub mod api;
pub mod dom;
pub mod events;
pub mod export;
pub mod filters;
pub mod lead_modal;
pub mod notifications;
pub mod view_switcher;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use leads_core::{AppConfig, Lead, LeadsError, Locale, PermitStatus, Severity};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, KeyboardEvent};

pub use events::{Components, UiAction};
pub use export::CsvExporter;
pub use filters::FilterBar;
pub use lead_modal::LeadModal;
pub use notifications::Notifier;
pub use view_switcher::ViewSwitcher;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// The mounted dashboard: its components plus the listeners feeding them
pub struct App {
    components: events::SharedComponents,
    _listeners: Vec<EventListener>,
}

impl App {
    pub fn mount(document: &Document) -> Result<Self, LeadsError> {
        let config = Rc::new(read_config(document)?);

        let notifier = notifications::shared_notifier()?;
        notifier.set_timing(config.notifications);
        let adopted = notifier.adopt_flash_messages();
        let views = ViewSwitcher::mount(document, &config.default_view);
        let modal = LeadModal::mount(document, config.clone(), notifier.clone());
        let filters = FilterBar::mount(document);

        console_log!(
            "Leads dashboard initialized (views: {}, modal: {}, filters: {}, flash messages: {})",
            views.as_ref().map(|v| v.active()).unwrap_or_else(|| "none".into()),
            modal.is_some(),
            filters.is_some(),
            adopted
        );

        let components = Rc::new(Components {
            notifier,
            views,
            modal,
            filters,
            exporter: CsvExporter::new(document.clone()),
        });

        let on_click = {
            let components = components.clone();
            EventListener::new(document, "click", move |event| {
                if let Some(action) = components.click_action(event.target()) {
                    if action.prevents_default() {
                        event.prevent_default();
                    }
                    components.dispatch(action);
                }
            })
        };

        let on_change = {
            let components = components.clone();
            EventListener::new(document, "change", move |event| {
                if let Some(action) = components.change_action(event.target()) {
                    components.dispatch(action);
                }
            })
        };

        let on_keydown = {
            let components = components.clone();
            EventListener::new(document, "keydown", move |event| {
                let action = event
                    .dyn_ref::<KeyboardEvent>()
                    .and_then(|e| events::key_action(&e.key()));
                if let Some(action) = action {
                    components.dispatch(action);
                }
            })
        };

        Ok(Self {
            components,
            _listeners: vec![on_click, on_change, on_keydown],
        })
    }

    pub fn notifier(&self) -> &Notifier {
        &self.components.notifier
    }

    pub fn modal(&self) -> Option<&LeadModal> {
        self.components.modal.as_ref()
    }

    pub fn filters(&self) -> Option<&FilterBar> {
        self.components.filters.as_ref()
    }
}

/// `<body data-config='{...}'>`; a malformed value is logged and ignored
fn read_config(document: &Document) -> Result<AppConfig, LeadsError> {
    let raw = dom::body(document)?
        .get_attribute("data-config")
        .unwrap_or_default();
    Ok(AppConfig::from_json(&raw).unwrap_or_else(|e| {
        console_error!("{}; using defaults", e);
        AppConfig::default()
    }))
}

fn mount_app() {
    match dom::document().and_then(|d| App::mount(&d)) {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(e) => console_error!("Leads dashboard failed to start: {}", e),
    }
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Ok(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| mount_app()).forget();
    } else {
        mount_app();
    }
}

/// Show a banner. `severity` is "success" (default) or "error".
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, severity: Option<String>) -> Result<f64, JsValue> {
    let severity = severity
        .as_deref()
        .map(Severity::parse)
        .unwrap_or_default();

    let id = notifications::shared_notifier()
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .show(message, severity)?;
    Ok(id as f64)
}

/// Open the detail modal for a lead, as a `.view-details` click would
#[wasm_bindgen(js_name = showLeadDetails)]
pub fn show_lead_details(lead_id: &str) -> Result<(), JsValue> {
    APP.with(|slot| {
        let app = slot.borrow();
        let modal = app
            .as_ref()
            .and_then(|app| app.modal())
            .ok_or_else(|| JsValue::from_str("Lead modal is not mounted"))?;
        modal.open(lead_id);
        Ok(())
    })
}

#[wasm_bindgen(js_name = closeLeadDetails)]
pub fn close_lead_details() -> bool {
    APP.with(|slot| {
        slot.borrow()
            .as_ref()
            .and_then(|app| app.modal())
            .map(|modal| modal.close())
            .unwrap_or(false)
    })
}

/// Display text for every modal slot of a lead object, keyed by slot class.
/// Lets script-rendered views share the modal's formatting.
#[wasm_bindgen(js_name = leadSlots)]
pub fn lead_slots(lead: JsValue) -> Result<JsValue, JsValue> {
    let lead: Lead = serde_wasm_bindgen::from_value(lead)
        .map_err(|e| JsValue::from_str(&format!("Invalid lead: {}", e)))?;

    let slots = js_sys::Object::new();
    for (slot, text) in leads_core::lead_slots(&lead, &Locale::default()) {
        js_sys::Reflect::set(&slots, &slot.into(), &text.into())?;
    }
    if let Some(status) = lead.status() {
        js_sys::Reflect::set(&slots, &"badge-class".into(), &status.badge_class().into())?;
    }
    Ok(slots.into())
}

#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(value: Option<f64>) -> String {
    leads_core::format_currency(value, &Locale::default())
}

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(value: Option<String>) -> String {
    leads_core::format_long_date(value.as_deref())
}

#[wasm_bindgen(js_name = statusBadgeClass)]
pub fn status_badge_class(status: &str) -> String {
    PermitStatus::parse(status).badge_class()
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }

    #[test]
    fn test_format_exports() {
        assert_eq!(format_currency(Some(150000.0)), "$150,000.00");
        assert_eq!(format_currency(None), "N/A");
        assert_eq!(format_date(Some("2024-01-15".to_string())), "January 15, 2024");
        assert_eq!(format_date(None), "N/A");
        assert_eq!(status_badge_class("In-Review"), "status-in-review");
    }
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use leads_core::Timing;
    use wasm_bindgen_test::*;
    use web_sys::{KeyboardEventInit, MouseEvent, MouseEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    const PAGE: &str = r#"
        <button class="view-btn active" data-view="table">Table</button>
        <button class="view-btn" data-view="cards">Cards</button>
        <div id="table-view" class="view-content"></div>
        <div id="cards-view" class="view-content"></div>
        <button class="view-details" data-lead-id="42">Details</button>
        <div id="leadModal" class="modal">
            <div class="modal-content">
                <button class="close-modal">x</button>
                <h2 class="permit-number"></h2>
            </div>
        </div>"#;

    fn mount_page() -> (Document, App) {
        let document = dom::document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(PAGE);
        let app = App::mount(&document).unwrap();
        (document, app)
    }

    fn click(el: &web_sys::Element) {
        let init = MouseEventInit::new();
        init.set_bubbles(true);
        let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
        el.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    async fn test_show_notification_before_mount_still_expires() {
        let document = dom::document().unwrap();
        notifications::shared_notifier().unwrap().set_timing(Timing {
            dismiss_after_ms: 20,
            fade_ms: 10,
        });

        let id = show_notification("Saved", None).unwrap();
        let selector = format!("[data-notification-id=\"{}\"]", id);
        assert!(document.query_selector(&selector).unwrap().is_some());

        TimeoutFuture::new(60).await;
        assert!(document.query_selector(&selector).unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_banner_ids_unique_across_callers() {
        let (_document, app) = mount_page();
        let from_app = app.notifier().show("from app", Severity::Success).unwrap();
        let from_js = show_notification("from script", None).unwrap() as u64;
        assert_ne!(from_app, from_js);
        assert!(app.notifier().dismiss(from_js));
        assert!(app.notifier().dismiss(from_app));
    }

    #[wasm_bindgen_test]
    fn test_view_button_click_switches_view() {
        let (document, _app) = mount_page();
        let cards = document
            .query_selector(".view-btn[data-view=\"cards\"]")
            .unwrap()
            .unwrap();
        click(&cards);
        let view = document.get_element_by_id("cards-view").unwrap();
        assert!(view.class_list().contains("active"));
        let table = document.get_element_by_id("table-view").unwrap();
        assert!(!table.class_list().contains("active"));
    }

    #[wasm_bindgen_test]
    fn test_filter_change_and_clear_button() {
        let document = dom::document().unwrap();
        document.body().unwrap().set_inner_html(
            r#"<select data-filter="location">
                   <option value="">All</option>
                   <option value="Calgary, AB">Calgary, AB</option>
               </select>
               <button class="clear-filters">Clear</button>
               <div id="table-view"><table><tbody>
                   <tr data-location="Toronto, ON"></tr>
                   <tr data-location="Calgary, AB"></tr>
               </tbody></table></div>"#,
        );
        let app = App::mount(&document).unwrap();
        let select = document.query_selector("select[data-filter]").unwrap().unwrap();
        select
            .dyn_ref::<web_sys::HtmlSelectElement>()
            .unwrap()
            .set_value("Calgary, AB");
        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        let change = web_sys::Event::new_with_event_init_dict("change", &init).unwrap();
        select.dispatch_event(&change).unwrap();

        let filters = app.filters().unwrap();
        assert_eq!(filters.get("location").as_deref(), Some("Calgary, AB"));
        assert_eq!(filters.visible(), 1);

        click(&document.query_selector(".clear-filters").unwrap().unwrap());
        assert_eq!(filters.visible(), 2);
        assert!(filters.get("location").is_none());
    }

    #[wasm_bindgen_test]
    fn test_escape_closes_open_modal() {
        let (document, app) = mount_page();
        let modal = app.modal().unwrap();
        let lead = leads_core::Lead::from_json(r#"{"permit_number":"BP-1"}"#).unwrap();
        // Drive the modal open without the network
        modal.open("42");
        if let leads_core::ModalState::Loading { ticket, .. } = modal.state() {
            modal.finish(&ticket, Ok(lead));
        }
        assert!(modal.is_open());
        assert!(dom::is_scroll_locked(&document));

        let init = KeyboardEventInit::new();
        init.set_key("Escape");
        init.set_bubbles(true);
        let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        document.dispatch_event(&event).unwrap();

        assert!(!modal.is_open());
        assert!(!dom::is_scroll_locked(&document));
    }

    #[wasm_bindgen_test]
    fn test_backdrop_click_closes_modal() {
        let (document, app) = mount_page();
        let modal = app.modal().unwrap();
        modal.open("42");
        if let leads_core::ModalState::Loading { ticket, .. } = modal.state() {
            modal.finish(&ticket, Ok(leads_core::Lead::default()));
        }
        let root = document.get_element_by_id("leadModal").unwrap();
        click(&root);
        assert!(!modal.is_open());
    }
}
