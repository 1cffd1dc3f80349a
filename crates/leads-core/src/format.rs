//! Presentation transforms for lead fields
//!
//! Absent values render as [`NOT_AVAILABLE`]. Currency uses the locale's symbol and
//! digit grouping with two decimals; dates render long-form ("January 15, 2024").

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Datetime layouts the backend has been seen to emit, tried in order
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Number and currency conventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub currency_symbol: String,
    pub group_separator: char,
    pub decimal_separator: char,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            group_separator: ',',
            decimal_separator: '.',
        }
    }
}

/// Format a currency amount; `None`, zero and non-finite values are "N/A"
pub fn format_currency(value: Option<f64>, locale: &Locale) -> String {
    let value = match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => return NOT_AVAILABLE.to_string(),
    };

    // Round to cents first (half-away-from-zero); past f64 cent precision the
    // value is already integral
    let scaled = value.abs() * 100.0;
    let rounded = if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value.abs()
    };

    let fixed = format!("{:.2}", rounded);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };

    format!(
        "{}{}{}{}{}",
        sign,
        locale.currency_symbol,
        group_digits(whole, locale.group_separator),
        locale.decimal_separator,
        cents
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Parse a backend date string into the calendar date it names
///
/// Offsets are honoured as written: `2024-01-15T23:00:00-05:00` is January 15.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    None
}

/// Long-form date such as "January 15, 2024"
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        MONTHS[date.month0() as usize],
        date.day(),
        date.year()
    )
}

/// Format a date field; absent values are "N/A" and unparseable ones pass through
pub fn format_long_date(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some(raw) => parse_date(raw)
            .map(long_date)
            .unwrap_or_else(|| raw.to_string()),
    }
}

/// Plain text field; missing or blank is "N/A"
pub fn display_text(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some(text) => text.to_string(),
    }
}
