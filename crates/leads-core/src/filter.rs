//! Dashboard list filters (project type, location, value range)
//!
//! A row passes when every active filter equals the row's value exactly.
//! Value ranges are compared without the `CAD ` prefix the intake form adds.

/// Filter keys, matching the `data-filter` attribute of each control
pub const FILTER_KEYS: [&str; 3] = ["project_type", "location", "value_range"];

/// Active filter values keyed by field name; an empty value clears a filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    active: Vec<(String, String)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. Returns true if the active set changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let value = normalize(key, value);
        if value.is_empty() {
            return self.clear(key);
        }
        match self.active.iter_mut().find(|(k, _)| k == key) {
            Some((_, current)) if *current == value => false,
            Some((_, current)) => {
                *current = value;
                true
            }
            None => {
                self.active.push((key.to_string(), value));
                true
            }
        }
    }

    pub fn clear(&mut self, key: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|(k, _)| k != key);
        self.active.len() != before
    }

    pub fn clear_all(&mut self) -> bool {
        let changed = !self.active.is_empty();
        self.active.clear();
        changed
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.active
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether a row passes. `field` looks up the row's value for a key;
    /// a row without the field fails any filter on it.
    pub fn matches<F>(&self, field: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        self.active.iter().all(|(key, wanted)| {
            field(key)
                .map(|value| normalize(key, &value) == *wanted)
                .unwrap_or(false)
        })
    }
}

fn normalize(key: &str, value: &str) -> String {
    let value = value.trim();
    if key == "value_range" {
        value.strip_prefix("CAD ").unwrap_or(value).trim().to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    const TORONTO_HOME: [(&str, &str); 3] = [
        ("project_type", "Residential"),
        ("location", "Toronto, ON"),
        ("value_range", "CAD $0 - $50,000"),
    ];

    #[test]
    fn test_no_filters_match_everything() {
        let filters = FilterSet::new();
        assert!(filters.matches(row(&TORONTO_HOME)));
        assert!(filters.matches(|_| None));
    }

    #[test]
    fn test_filters_combine() {
        let mut filters = FilterSet::new();
        assert!(filters.set("project_type", "Residential"));
        assert!(filters.matches(row(&TORONTO_HOME)));

        assert!(filters.set("location", "Calgary, AB"));
        assert!(!filters.matches(row(&TORONTO_HOME)));

        assert!(filters.set("location", "Toronto, ON"));
        assert!(filters.matches(row(&TORONTO_HOME)));
    }

    #[test]
    fn test_value_range_ignores_currency_prefix() {
        let mut filters = FilterSet::new();
        filters.set("value_range", "$0 - $50,000");
        assert!(filters.matches(row(&TORONTO_HOME)));

        filters.set("value_range", "CAD $0 - $50,000");
        assert_eq!(filters.get("value_range"), Some("$0 - $50,000"));
        assert!(filters.matches(row(&TORONTO_HOME)));
    }

    #[test]
    fn test_empty_value_clears() {
        let mut filters = FilterSet::new();
        filters.set("location", "Toronto, ON");
        assert!(!filters.set("location", "Toronto, ON"));
        assert!(filters.set("location", "  "));
        assert!(filters.is_empty());
        assert!(!filters.clear("location"));
    }

    #[test]
    fn test_missing_field_fails_active_filter() {
        let mut filters = FilterSet::new();
        filters.set("project_type", "Commercial");
        assert!(!filters.matches(|_| None));
        assert!(filters.clear_all());
        assert!(!filters.clear_all());
    }
}
