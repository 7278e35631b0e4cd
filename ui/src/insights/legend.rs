//! Signal wrapper turning `core::legend` into a per-chart hook.

use dioxus::prelude::*;

use crate::core::legend::LegendState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractiveLegend {
    state: Signal<LegendState>,
}

/// One legend per chart instance; `series_keys` is the chart's fixed key set.
pub fn use_interactive_legend<K: AsRef<str>>(series_keys: &[K]) -> InteractiveLegend {
    let keys: Vec<String> = series_keys.iter().map(|key| key.as_ref().to_string()).collect();
    let mut state = use_signal(|| LegendState::new(&keys));

    // A platform filter edit changes the chart's key set; stale visibility
    // state would then reference series that no longer exist.
    if state.peek().keys() != keys.as_slice() {
        state.set(LegendState::new(&keys));
    }

    InteractiveLegend { state }
}

impl InteractiveLegend {
    /// Wire this to the legend item's click handler; shift-click isolates.
    pub fn on_legend_click(mut self, key: &str, shift_held: bool) {
        self.state.with_mut(|legend| legend.handle_click(key, shift_held));
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.state.read().is_visible(key)
    }

    pub fn opacity_for(&self, key: &str) -> f64 {
        self.state.read().opacity_for(key)
    }

    pub fn isolated_key(&self) -> Option<String> {
        self.state.read().isolated_key().map(str::to_string)
    }

    pub fn reset(mut self) {
        self.state.with_mut(LegendState::reset);
    }
}
