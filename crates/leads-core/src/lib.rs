//! Platform-independent core of the leads dashboard
//!
//! Everything here runs natively so it can be unit tested without a browser:
//! the lead record, field presentation, view switching, the detail modal's
//! request lifecycle, list filters, notification timing and CSV export. The DOM-bound
//! components live in `leads-wasm`.

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod modal;
pub mod model;
pub mod notification;
pub mod view;

pub use config::AppConfig;
pub use error::LeadsError;
pub use export::{export_filename, to_csv, LeadRow};
pub use filter::{FilterSet, FILTER_KEYS};
pub use format::{display_text, format_currency, format_long_date, Locale, NOT_AVAILABLE};
pub use modal::{ModalMachine, ModalState, RequestTicket, Resolution};
pub use model::{Lead, PermitStatus};
pub use notification::{Notification, NotificationStack, Severity, Timing};
pub use view::ViewSet;

/// Text for each modal slot, keyed by the slot's class name
///
/// Order matches the modal layout. The status badge class is separate, see
/// [`PermitStatus::badge_class`].
pub fn lead_slots(lead: &Lead, locale: &Locale) -> Vec<(&'static str, String)> {
    let text = |v: &Option<String>| display_text(v.as_deref());
    let date = |v: &Option<String>| format_long_date(v.as_deref());

    vec![
        ("permit-number", text(&lead.permit_number)),
        ("permit-status", text(&lead.permit_status)),
        ("permit-description", text(&lead.permit_description)),
        ("project-type", text(&lead.project_type)),
        ("work-type", text(&lead.work_type)),
        ("sub-work-type", text(&lead.sub_work_type)),
        ("location", text(&lead.location)),
        ("legal-description", text(&lead.legal_description)),
        (
            "construction-value",
            format_currency(lead.construction_value, locale),
        ),
        ("total-units", text(&lead.total_units)),
        ("units-created", text(&lead.units_created)),
        ("submission-date", date(&lead.submission_date)),
        ("issue-date", date(&lead.issue_date)),
        ("expiry-date", date(&lead.expiry_date)),
        ("owner", text(&lead.owner)),
        ("applicant", text(&lead.applicant)),
        ("contractor", text(&lead.contractor)),
        ("contractor-contact", text(&lead.contractor_contact)),
    ]
}
