//! End-to-end checks for the filter state ↔ URL query contract: a URL pasted
//! into a new session must reproduce the exact selections, and every
//! documented fallback must normalize rather than error.

use time::macros::datetime;
use ui::core::filters::{
    from_query_string, to_query_string, FilterState, Platform, PrimaryMetric, RefreshInterval,
};
use ui::core::timerange::{BucketType, DateWindow, TimeRangePreset};

#[test]
fn shared_url_reproduces_the_full_dashboard_state() {
    let mut state = FilterState::with_timezone("Europe/Berlin");
    state.set_time_range(TimeRangePreset::D90);
    state.set_platforms(vec![Platform::TikTok, Platform::YouTube]);
    state.set_accounts(vec!["@acme".into(), "@rival_studio".into()]);
    state.set_primary_metric(PrimaryMetric::AvgViewsPerPost);
    state.set_refresh_interval(RefreshInterval::M15);

    let query = to_query_string(&state);
    let restored = from_query_string(&query, "UTC");

    assert_eq!(restored, state);
    assert_eq!(restored.timezone, "Europe/Berlin");
    assert_eq!(restored.bucket_type(), BucketType::Daily);
}

#[test]
fn custom_window_survives_the_round_trip_and_resolves_verbatim() {
    let window = DateWindow {
        from: datetime!(2024-01-08 00:00:00 UTC),
        to: datetime!(2024-01-22 00:00:00 UTC),
    };

    let mut state = FilterState::with_timezone("UTC");
    state.set_custom_range(Some(window));

    let restored = from_query_string(&to_query_string(&state), "UTC");
    assert_eq!(restored.time_range, TimeRangePreset::Custom);
    assert_eq!(restored.custom_range, Some(window));

    let now = datetime!(2024-03-10 12:00:00 UTC);
    assert_eq!(restored.date_window(now), window);
}

#[test]
fn account_handles_with_reserved_characters_survive_the_url() {
    let mut state = FilterState::with_timezone("UTC");
    state.set_accounts(vec!["a&b".into(), "promo=2024".into()]);

    let restored = from_query_string(&to_query_string(&state), "UTC");
    assert_eq!(
        restored.account_ids,
        vec!["a&b".to_string(), "promo=2024".to_string()]
    );
    assert_eq!(restored, state);
}

#[test]
fn hand_written_short_url_fills_in_defaults() {
    // Older shared links only carried `range`; everything else defaults.
    let restored = from_query_string("range=24h", "America/Chicago");

    assert_eq!(restored.time_range, TimeRangePreset::H24);
    assert_eq!(restored.bucket_type(), BucketType::Hourly);
    assert_eq!(restored.platforms, Platform::ALL.to_vec());
    assert!(restored.account_ids.is_empty());
    assert_eq!(restored.primary_metric, PrimaryMetric::Views);
    assert_eq!(restored.refresh_interval, RefreshInterval::Off);
    assert_eq!(restored.timezone, "America/Chicago");
}

#[test]
fn empty_and_garbage_queries_yield_the_default_state() {
    let default_state = FilterState::with_timezone("UTC");
    assert_eq!(from_query_string("", "UTC"), default_state);
    assert_eq!(from_query_string("?", "UTC"), default_state);
    assert_eq!(from_query_string("not-even-pairs", "UTC"), default_state);
}

#[test]
fn mutations_after_restore_keep_invariants() {
    let mut state = from_query_string("range=custom&from=2024-01-01T00:00:00Z&to=2024-01-02T00:00:00Z&platforms=tiktok", "UTC");
    assert_eq!(state.platforms, vec![Platform::TikTok]);

    // Switching off custom drops the bounds from the next serialized URL.
    state.set_time_range(TimeRangePreset::D30);
    let query = to_query_string(&state);
    assert!(!query.contains("from="));
    assert!(!query.contains("to="));

    // Clearing platforms re-expands to the full set in the URL too.
    state.set_platforms(Vec::new());
    let query = to_query_string(&state);
    assert!(query.contains("platforms=tiktok,instagram,youtube"));
}
