//! Lead record as served by `GET /api/leads/{id}`
//!
//! The backend owns these records. Field names follow its JSON exactly and every
//! field is optional: a missing value is a display concern, not a decode error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::LeadsError;

/// A permit/project record shown in the detail modal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    pub permit_number: Option<String>,
    pub permit_type: Option<String>,
    pub permit_status: Option<String>,
    pub permit_description: Option<String>,

    pub project_type: Option<String>,
    pub work_type: Option<String>,
    pub sub_work_type: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub construction_value: Option<f64>,
    pub value_range: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub total_units: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub units_created: Option<String>,

    pub location: Option<String>,
    pub legal_description: Option<String>,

    pub owner: Option<String>,
    pub applicant: Option<String>,
    pub contractor: Option<String>,
    pub contractor_contact: Option<String>,

    pub submission_date: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
}

impl Lead {
    /// Decode a lead from the JSON body of the detail endpoint
    pub fn from_json(body: &str) -> Result<Self, LeadsError> {
        serde_json::from_str(body).map_err(|e| LeadsError::Decode(e.to_string()))
    }

    pub fn status(&self) -> Option<PermitStatus> {
        self.permit_status.as_deref().map(PermitStatus::parse)
    }
}

/// Permit lifecycle status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermitStatus {
    Pending,
    Approved,
    InReview,
    Closed,
    Expired,
    /// Anything else the backend sends, kept as received
    Other(String),
}

impl PermitStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "pending" => PermitStatus::Pending,
            "approved" => PermitStatus::Approved,
            "in-review" => PermitStatus::InReview,
            "closed" => PermitStatus::Closed,
            "expired" => PermitStatus::Expired,
            _ => PermitStatus::Other(raw.to_string()),
        }
    }

    /// Lowercased status value used as the badge class suffix
    pub fn slug(&self) -> String {
        match self {
            PermitStatus::Pending => "pending".to_string(),
            PermitStatus::Approved => "approved".to_string(),
            PermitStatus::InReview => "in-review".to_string(),
            PermitStatus::Closed => "closed".to_string(),
            PermitStatus::Expired => "expired".to_string(),
            PermitStatus::Other(raw) => raw.to_lowercase(),
        }
    }

    /// CSS class selecting the badge variant, e.g. `status-approved`
    pub fn badge_class(&self) -> String {
        format!("status-{}", self.slug())
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PermitStatus::Other(_))
    }
}

/// Accept a string or a number, render numbers without a trailing `.0`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        }),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Accept a number or a currency-looking string such as `"$1,250.00"`
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_amount(&s),
        _ => None,
    })
}

/// Parse an amount, ignoring currency symbols, grouping commas and a `CAD` prefix
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("CAD")
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_full_record() {
        let lead = Lead::from_json(
            r#"{
                "id": 42,
                "permit_number": "BP-100",
                "permit_status": "Approved",
                "construction_value": 150000,
                "submission_date": "2024-01-15",
                "total_units": 3,
                "owner": "Jane Smith",
                "coordinates": {"lat": 43.45, "lng": -80.49}
            }"#,
        )
        .unwrap();

        assert_eq!(lead.id.as_deref(), Some("42"));
        assert_eq!(lead.permit_number.as_deref(), Some("BP-100"));
        assert_eq!(lead.construction_value, Some(150000.0));
        assert_eq!(lead.total_units.as_deref(), Some("3"));
        assert_eq!(lead.status(), Some(PermitStatus::Approved));
        assert_eq!(lead.issue_date, None);
    }

    #[test]
    fn test_decode_empty_object() {
        let lead = Lead::from_json("{}").unwrap();
        assert_eq!(lead, Lead::default());
    }

    #[test]
    fn test_decode_nulls() {
        let lead = Lead::from_json(
            r#"{"construction_value": null, "total_units": null, "owner": null}"#,
        )
        .unwrap();
        assert_eq!(lead.construction_value, None);
        assert_eq!(lead.total_units, None);
        assert_eq!(lead.owner, None);
    }

    #[test]
    fn test_decode_string_amount() {
        let lead = Lead::from_json(r#"{"construction_value": "$1,250.50"}"#).unwrap();
        assert_eq!(lead.construction_value, Some(1250.5));

        let lead = Lead::from_json(r#"{"construction_value": "unknown"}"#).unwrap();
        assert_eq!(lead.construction_value, None);
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(matches!(Lead::from_json("[1, 2]"), Err(LeadsError::Decode(_))));
        assert!(matches!(Lead::from_json("<html>"), Err(LeadsError::Decode(_))));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("CAD $50,000"), Some(50000.0));
        assert_eq!(parse_amount("  1200.75 "), Some(1200.75));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_status_parse_known() {
        assert_eq!(PermitStatus::parse("Pending"), PermitStatus::Pending);
        assert_eq!(PermitStatus::parse("APPROVED"), PermitStatus::Approved);
        assert_eq!(PermitStatus::parse("In-Review"), PermitStatus::InReview);
        assert_eq!(PermitStatus::parse("closed"), PermitStatus::Closed);
        assert_eq!(PermitStatus::parse("Expired"), PermitStatus::Expired);
    }

    #[test]
    fn test_badge_class() {
        assert_eq!(PermitStatus::parse("Approved").badge_class(), "status-approved");
        assert_eq!(PermitStatus::parse("in-review").badge_class(), "status-in-review");
    }

    #[test]
    fn test_badge_class_unrecognized_is_verbatim_lowercase() {
        let status = PermitStatus::parse("On Hold");
        assert!(!status.is_known());
        assert_eq!(status.badge_class(), "status-on hold");
    }
}
