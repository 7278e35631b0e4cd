//! Insights dashboard: the filter store, legend hook, and the components that
//! consume them.

pub mod legend;
pub mod state;

mod filter_bar;
pub use filter_bar::FilterBar;

mod chart;
pub use chart::TimeSeriesChart;

mod cards;
pub use cards::HighlightCards;

mod export;
pub use export::SnapshotExportPanel;
