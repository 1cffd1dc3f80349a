//! CSV download of the dashboard's lead table

use chrono::{NaiveDate, NaiveDateTime};
use js_sys::Array;
use leads_core::export::{export_filename, to_csv, LeadRow};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, Element, HtmlElement, Url};

use crate::dom::query_all;

pub const TRIGGER_SELECTOR: &str = ".export-csv";
const ROW_SELECTOR: &str = "#table-view tbody tr";
const COLUMNS: [&str; 4] = [
    "data-project-type",
    "data-location",
    "data-value-range",
    "data-submission-date",
];

pub struct CsvExporter {
    document: Document,
}

impl CsvExporter {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Rows currently listed (rows with the `hidden` attribute are skipped)
    pub fn rows(&self) -> Vec<LeadRow> {
        query_all(&self.document, ROW_SELECTOR)
            .iter()
            .filter(|tr| !tr.has_attribute("hidden"))
            .map(read_row)
            .collect()
    }

    /// Build the CSV and hand it to the browser as a download
    pub fn download(&self) -> Result<usize, JsValue> {
        let rows = self.rows();
        let csv = to_csv(&rows);

        let opts = BlobPropertyBag::new();
        opts.set_type("text/csv;charset=utf-8");
        let parts = Array::of1(&JsValue::from_str(&csv));
        let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let link = self.document.create_element("a")?;
        link.set_attribute("href", &url)?;
        link.set_attribute("download", &export_filename(local_now()))?;
        link.dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("Anchor is not an HtmlElement"))?
            .click();
        Url::revoke_object_url(&url)?;

        Ok(rows.len())
    }
}

/// Prefer the row's data attributes, fall back to the first four cells
fn read_row(tr: &Element) -> LeadRow {
    let cells = query_all(tr, "td");
    let field = |idx: usize| -> String {
        tr.get_attribute(COLUMNS[idx])
            .or_else(|| cells.get(idx).and_then(|td| td.text_content()))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    LeadRow {
        project_type: field(0),
        location: field(1),
        value_range: field(2),
        submission_date: field(3),
    }
}

fn local_now() -> NaiveDateTime {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .and_then(|d| d.and_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds()))
        .unwrap_or_default()
}
