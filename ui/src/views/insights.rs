use dioxus::prelude::*;

use crate::insights::state::use_insights_filters_provider;
use crate::insights::{FilterBar, HighlightCards, SnapshotExportPanel, TimeSeriesChart};

/// The insights dashboard. Owns the filter store for its subtree: state is
/// seeded from the URL here and written back on every change.
#[component]
pub fn Insights() -> Element {
    use_insights_filters_provider();

    rsx! {
        section { class: "page page-insights",
            h1 { "Insights" }

            FilterBar {}
            HighlightCards {}
            TimeSeriesChart {}
            SnapshotExportPanel {}
        }
    }
}
