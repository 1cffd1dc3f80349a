//! CSV export of the dashboard lead list

use chrono::NaiveDateTime;

pub const CSV_HEADERS: [&str; 4] = ["Project Type", "Location", "Value Range", "Submission Date"];

/// One row of the lead list as rendered on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadRow {
    pub project_type: String,
    pub location: String,
    pub value_range: String,
    pub submission_date: String,
}

impl LeadRow {
    fn fields(&self) -> [&str; 4] {
        [
            &self.project_type,
            &self.location,
            &self.value_range,
            &self.submission_date,
        ]
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_record<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    let line: Vec<String> = fields.into_iter().map(escape_field).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Serialize rows with a header line; CRLF record separators
pub fn to_csv(rows: &[LeadRow]) -> String {
    let mut out = String::new();
    write_record(&mut out, CSV_HEADERS);
    for row in rows {
        write_record(&mut out, row.fields());
    }
    out
}

/// Download name, e.g. `construction_leads_20240115_093000.csv`
pub fn export_filename(at: NaiveDateTime) -> String {
    format!("construction_leads_{}.csv", at.format("%Y%m%d_%H%M%S"))
}
