//! Dashboard configuration
//!
//! Supplied by the page as JSON in `<body data-config='...'>`. Every key is
//! optional; an absent attribute means all defaults.

use serde::{Deserialize, Serialize};

use crate::error::LeadsError;
use crate::format::Locale;
use crate::notification::Timing;

pub const DEFAULT_VIEW: &str = "table";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for API requests; empty means same origin
    pub api_base: String,
    pub default_view: String,
    pub locale: Locale,
    pub notifications: Timing,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            default_view: DEFAULT_VIEW.to_string(),
            locale: Locale::default(),
            notifications: Timing::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, LeadsError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| LeadsError::Config(e.to_string()))
    }

    /// `GET` endpoint for a single lead
    pub fn lead_url(&self, lead_id: &str) -> String {
        format!(
            "{}/api/leads/{}",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(lead_id.trim())
        )
    }
}
