//! Mutually exclusive list views ("table", "cards")

/// Set of named views with exactly one active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSet {
    views: Vec<String>,
    active: usize,
}

impl ViewSet {
    /// Build a view set; `default` becomes active when it is one of `views`,
    /// otherwise the first view is. Returns `None` for an empty set.
    pub fn new<I, S>(views: I, default: &str) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for view in views {
            let view = view.into();
            if !names.contains(&view) {
                names.push(view);
            }
        }
        if names.is_empty() {
            return None;
        }
        let active = names.iter().position(|v| v == default).unwrap_or(0);
        Some(Self {
            views: names,
            active,
        })
    }

    pub fn active(&self) -> &str {
        &self.views[self.active]
    }

    pub fn views(&self) -> &[String] {
        &self.views
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active() == name
    }

    /// Switch to `name`. Unknown names leave the current view in place.
    pub fn activate(&mut self, name: &str) -> bool {
        match self.views.iter().position(|v| v == name) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    /// (name, active) pairs in declaration order, for applying to the DOM
    pub fn states(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.views
            .iter()
            .enumerate()
            .map(move |(idx, v)| (v.as_str(), idx == self.active))
    }
}
