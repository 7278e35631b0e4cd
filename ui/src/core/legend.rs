//! Legend visibility state for a single chart.
//!
//! Plain click toggles one series; shift-click isolates it (or, on the
//! already-isolated key, restores everything). Isolation is implemented by
//! pre-hiding every other key, so `is_visible` stays a single set lookup.

use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendState {
    all_keys: Vec<String>,
    hidden: BTreeSet<String>,
    isolated: Option<String>,
}

impl LegendState {
    pub fn new<K: AsRef<str>>(all_keys: &[K]) -> Self {
        Self {
            all_keys: all_keys.iter().map(|key| key.as_ref().to_string()).collect(),
            hidden: BTreeSet::new(),
            isolated: None,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.all_keys
    }

    pub fn isolated_key(&self) -> Option<&str> {
        self.isolated.as_deref()
    }

    /// Apply one legend interaction.
    pub fn handle_click(&mut self, key: &str, shift_held: bool) {
        if shift_held {
            if self.isolated.as_deref() == Some(key) {
                // Second shift-click on the isolated key restores everything.
                self.reset();
            } else {
                self.isolated = Some(key.to_string());
                self.hidden = self
                    .all_keys
                    .iter()
                    .filter(|candidate| candidate.as_str() != key)
                    .cloned()
                    .collect();
            }
        } else {
            // A plain click always exits isolation mode, even on the
            // isolated key itself. Leaving isolation drops the hidden set it
            // installed, so the click ends with just its own target toggled.
            if self.isolated.take().is_some() {
                self.hidden.clear();
            }
            if !self.hidden.remove(key) {
                self.hidden.insert(key.to_string());
            }
        }
    }

    pub fn is_visible(&self, key: &str) -> bool {
        !self.hidden.contains(key)
    }

    /// Render opacity for a legend entry. Isolation dims rather than removes
    /// so the legend keeps its layout.
    pub fn opacity_for(&self, key: &str) -> f64 {
        match &self.isolated {
            Some(isolated) => {
                if isolated == key {
                    1.0
                } else {
                    0.1
                }
            }
            None => {
                if self.hidden.contains(key) {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.hidden.clear();
        self.isolated = None;
    }
}
