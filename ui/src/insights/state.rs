//! Reactive filter store for the insights view.
//!
//! One `InsightsFilters` context is provided when the view mounts, seeded from
//! the URL query string. Every setter applies one transition from
//! `core::filters` and then rewrites the URL; the URL is never re-read after
//! mount. Auto-refresh runs in a single coroutine that waits on either the
//! next interval command or the timer, so two timers can never be live at
//! once and unmounting the view drops the loop with the scope.

use dioxus::prelude::*;
use futures::future::{select, Either};
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;

use crate::core::filters::{self, FilterState, Platform, PrimaryMetric, RefreshInterval};
use crate::core::timerange::{BucketType, DateWindow, TimeRangePreset};
use crate::core::{platform, timing};

#[derive(Clone, Copy)]
pub struct InsightsFilters {
    filters: Signal<FilterState>,
    refresh_tick: Signal<u64>,
    refresh_loop: Coroutine<RefreshInterval>,
}

/// Provide the filter store to the subtree. Call once, from the insights view.
pub fn use_insights_filters_provider() -> InsightsFilters {
    let filters = use_signal(|| {
        let default_tz = platform::local_timezone();
        match platform::read_query_string() {
            Some(query) => filters::from_query_string(&query, &default_tz),
            None => FilterState::with_timezone(default_tz),
        }
    });
    let refresh_tick = use_signal(|| 0u64);

    let refresh_loop = use_coroutine(move |mut rx: UnboundedReceiver<RefreshInterval>| {
        // A URL-seeded interval starts ticking immediately.
        let initial = filters.peek().refresh_interval;
        let mut refresh_tick = refresh_tick;

        async move {
            let mut interval = initial;
            loop {
                match interval.period_ms() {
                    // Off: park until the next command.
                    None => match rx.next().await {
                        Some(next) => interval = next,
                        None => break,
                    },
                    Some(period_ms) => {
                        let sleep = Box::pin(timing::sleep_ms(period_ms));
                        match select(rx.next(), sleep).await {
                            // A new interval replaces the pending sleep.
                            Either::Left((Some(next), _)) => interval = next,
                            Either::Left((None, _)) => break,
                            Either::Right(((), _)) => {
                                let tick = *refresh_tick.peek() + 1;
                                refresh_tick.set(tick);
                            }
                        }
                    }
                }
            }
        }
    });

    use_context_provider(|| InsightsFilters {
        filters,
        refresh_tick,
        refresh_loop,
    })
}

/// Access the store from any descendant of the insights view.
pub fn use_insights_filters() -> InsightsFilters {
    use_context()
}

impl InsightsFilters {
    /// Snapshot of the current selections.
    pub fn filters(&self) -> FilterState {
        (self.filters)()
    }

    /// Opaque counter; any change means "recompute derived data".
    pub fn refresh_tick(&self) -> u64 {
        (self.refresh_tick)()
    }

    /// Resolved `[from, to)` window for the current selections.
    pub fn date_range(&self) -> DateWindow {
        self.filters.read().date_window(timing::now())
    }

    pub fn bucket_type(&self) -> BucketType {
        self.filters.read().bucket_type()
    }

    pub fn set_time_range(mut self, preset: TimeRangePreset) {
        self.filters.with_mut(|state| state.set_time_range(preset));
        self.sync_url();
    }

    pub fn set_custom_range(mut self, range: Option<DateWindow>) {
        self.filters.with_mut(|state| state.set_custom_range(range));
        self.sync_url();
    }

    pub fn set_platforms(mut self, platforms: Vec<Platform>) {
        self.filters.with_mut(|state| state.set_platforms(platforms));
        self.sync_url();
    }

    pub fn set_accounts(mut self, account_ids: Vec<String>) {
        self.filters.with_mut(|state| state.set_accounts(account_ids));
        self.sync_url();
    }

    pub fn set_primary_metric(mut self, metric: PrimaryMetric) {
        self.filters.with_mut(|state| state.set_primary_metric(metric));
        self.sync_url();
    }

    pub fn set_timezone(mut self, timezone: String) {
        self.filters.with_mut(|state| state.set_timezone(timezone));
        self.sync_url();
    }

    pub fn set_refresh_interval(mut self, interval: RefreshInterval) {
        self.filters
            .with_mut(|state| state.set_refresh_interval(interval));
        self.sync_url();
        self.refresh_loop.send(interval);
    }

    /// Bump the refresh counter so consumers drop cached derived data, whether
    /// or not any filter field changed.
    pub fn trigger_refresh(mut self) {
        let tick = *self.refresh_tick.peek() + 1;
        self.refresh_tick.set(tick);
    }

    fn sync_url(&self) {
        let query = filters::to_query_string(&self.filters.peek());
        platform::write_query_string(&query);
    }
}
