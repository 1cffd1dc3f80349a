//! Transient notification banners

use serde::{Deserialize, Serialize};

/// Banner stays fully visible this long
pub const DISMISS_AFTER_MS: u32 = 5_000;
/// Fade-out transition before removal
pub const FADE_MS: u32 = 300;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Error,
}

impl Severity {
    /// Anything other than "error" is a success banner
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("error") {
            Severity::Error
        } else {
            Severity::Success
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub dismiss_after_ms: u32,
    pub fade_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            dismiss_after_ms: DISMISS_AFTER_MS,
            fade_ms: FADE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

/// Banners currently on screen, oldest first
///
/// No de-duplication or priority: identical messages stack in arrival order.
#[derive(Debug, Default)]
pub struct NotificationStack {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: &str, severity: Severity) -> Notification {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            message: message.to_string(),
            severity,
        };
        self.entries.push(notification.clone());
        notification
    }

    /// Remove a banner; returns false if it was already gone
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
