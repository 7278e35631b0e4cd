//! Pure, UI-free logic: filter state, date-window resolution, legend state,
//! formatting, and the platform/timing glue the views build on.

pub mod filters;
pub mod format;
pub mod legend;
pub mod mock;
pub mod platform;
pub mod timerange;
pub mod timing;
