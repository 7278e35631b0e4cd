//! Filter selections for the insights view, plus the URL query codec.
//!
//! `FilterState` is plain data with small transition methods so the rules
//! (platform normalization, custom-range/preset coupling) are testable without
//! any UI attached. The reactive wrapper lives in `insights::state`.

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use urlencoding::{decode, encode};

use super::timerange::{bucket_for, resolve_window, BucketType, DateWindow, TimeRangePreset};

/// Supported social platform. Closed set; analytics never runs with zero
/// platforms selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Instagram,
    YouTube,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Self::TikTok, Self::Instagram, Self::YouTube];

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::TikTok => "tiktok",
            Self::Instagram => "instagram",
            Self::YouTube => "youtube",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|platform| platform.as_tag() == tag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TikTok => "TikTok",
            Self::Instagram => "Instagram",
            Self::YouTube => "YouTube",
        }
    }
}

/// Numeric field charts plot on the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryMetric {
    #[default]
    Views,
    Likes,
    Comments,
    Shares,
    EngagementRate,
    LikeRate,
    CommentRate,
    AvgViewsPerPost,
}

impl PrimaryMetric {
    pub const ALL: [PrimaryMetric; 8] = [
        Self::Views,
        Self::Likes,
        Self::Comments,
        Self::Shares,
        Self::EngagementRate,
        Self::LikeRate,
        Self::CommentRate,
        Self::AvgViewsPerPost,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Likes => "likes",
            Self::Comments => "comments",
            Self::Shares => "shares",
            Self::EngagementRate => "engagement_rate",
            Self::LikeRate => "like_rate",
            Self::CommentRate => "comment_rate",
            Self::AvgViewsPerPost => "avg_views_per_post",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|metric| metric.as_tag() == tag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Views => "Views",
            Self::Likes => "Likes",
            Self::Comments => "Comments",
            Self::Shares => "Shares",
            Self::EngagementRate => "Engagement rate",
            Self::LikeRate => "Like rate",
            Self::CommentRate => "Comment rate",
            Self::AvgViewsPerPost => "Avg views / post",
        }
    }

    /// Rate metrics render as percentages; everything else as counts.
    pub fn is_rate(&self) -> bool {
        matches!(self, Self::EngagementRate | Self::LikeRate | Self::CommentRate)
    }
}

/// Auto-refresh cadence for derived data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshInterval {
    #[default]
    Off,
    S30,
    M1,
    M5,
    M15,
}

impl RefreshInterval {
    pub const ALL: [RefreshInterval; 5] = [Self::Off, Self::S30, Self::M1, Self::M5, Self::M15];

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::S30 => "30s",
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|interval| interval.as_tag() == tag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::S30 => "Every 30s",
            Self::M1 => "Every minute",
            Self::M5 => "Every 5 min",
            Self::M15 => "Every 15 min",
        }
    }

    /// Timer period, `None` when auto-refresh is off.
    pub fn period_ms(&self) -> Option<u64> {
        match self {
            Self::Off => None,
            Self::S30 => Some(30_000),
            Self::M1 => Some(60_000),
            Self::M5 => Some(300_000),
            Self::M15 => Some(900_000),
        }
    }
}

/// Active filter selections for the insights view.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub time_range: TimeRangePreset,
    pub custom_range: Option<DateWindow>,
    pub platforms: Vec<Platform>,
    pub account_ids: Vec<String>,
    pub primary_metric: PrimaryMetric,
    pub timezone: String,
    pub refresh_interval: RefreshInterval,
}

impl FilterState {
    pub fn with_timezone(timezone: impl Into<String>) -> Self {
        Self {
            time_range: TimeRangePreset::default(),
            custom_range: None,
            platforms: Platform::ALL.to_vec(),
            account_ids: Vec::new(),
            primary_metric: PrimaryMetric::default(),
            timezone: timezone.into(),
            refresh_interval: RefreshInterval::default(),
        }
    }

    /// Replace the preset. Leaving `Custom` clears the stored custom range so
    /// stale bounds never reappear on a later switch back.
    pub fn set_time_range(&mut self, preset: TimeRangePreset) {
        self.time_range = preset;
        if preset != TimeRangePreset::Custom {
            self.custom_range = None;
        }
    }

    /// Store a custom range. A concrete range also forces the preset to
    /// `Custom`; a custom range under any other preset must never be
    /// observable.
    pub fn set_custom_range(&mut self, range: Option<DateWindow>) {
        if range.is_some() {
            self.time_range = TimeRangePreset::Custom;
        }
        self.custom_range = range;
    }

    /// Empty selection means "no filter", so it is stored as the full set.
    pub fn set_platforms(&mut self, platforms: Vec<Platform>) {
        self.platforms = if platforms.is_empty() {
            Platform::ALL.to_vec()
        } else {
            platforms
        };
    }

    /// Stored verbatim. Empty is a valid "nothing selected" state for
    /// accounts, unlike platforms.
    pub fn set_accounts(&mut self, account_ids: Vec<String>) {
        self.account_ids = account_ids;
    }

    pub fn set_primary_metric(&mut self, metric: PrimaryMetric) {
        self.primary_metric = metric;
    }

    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.timezone = timezone.into();
    }

    pub fn set_refresh_interval(&mut self, interval: RefreshInterval) {
        self.refresh_interval = interval;
    }

    pub fn date_window(&self, now: OffsetDateTime) -> DateWindow {
        resolve_window(self.time_range, self.custom_range.as_ref(), now)
    }

    pub fn bucket_type(&self) -> BucketType {
        bucket_for(self.time_range)
    }
}

/// Serialize the full state to a URL query string. All keys are written, so a
/// pasted URL reproduces the state exactly; `from`/`to` appear only for a
/// custom range. Free-text values (account ids, timezone) are percent-encoded
/// so reserved characters survive the round trip; each account id is encoded
/// on its own, keeping the comma as the list separator.
pub fn to_query_string(state: &FilterState) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    pairs.push(("range", state.time_range.as_tag().to_string()));

    if let Some(range) = &state.custom_range {
        if let (Ok(from), Ok(to)) = (range.from.format(&Rfc3339), range.to.format(&Rfc3339)) {
            pairs.push(("from", from));
            pairs.push(("to", to));
        }
    }

    let platforms = state
        .platforms
        .iter()
        .map(|platform| platform.as_tag())
        .collect::<Vec<_>>()
        .join(",");
    pairs.push(("platforms", platforms));

    let accounts = state
        .account_ids
        .iter()
        .map(|id| encode(id))
        .collect::<Vec<_>>()
        .join(",");
    pairs.push(("accounts", accounts));
    pairs.push(("metric", state.primary_metric.as_tag().to_string()));
    pairs.push(("tz", encode(&state.timezone).into_owned()));
    pairs.push(("refresh", state.refresh_interval.as_tag().to_string()));

    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a query string back into a `FilterState`. Tolerant by design:
/// unknown keys are ignored, bad tags fall back to defaults, an inverted
/// custom pair is discarded, an empty platform list normalizes to the full
/// set, and a value that fails percent-decoding is kept raw.
pub fn from_query_string(query: &str, default_tz: &str) -> FilterState {
    let mut state = FilterState::with_timezone(default_tz);

    let query = query.trim_start_matches('?');
    let mut custom_from: Option<OffsetDateTime> = None;
    let mut custom_to: Option<OffsetDateTime> = None;

    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };

        match key {
            "range" => {
                if let Some(preset) = TimeRangePreset::from_tag(value) {
                    state.time_range = preset;
                }
            }
            "from" => custom_from = OffsetDateTime::parse(value, &Rfc3339).ok(),
            "to" => custom_to = OffsetDateTime::parse(value, &Rfc3339).ok(),
            "platforms" => {
                let platforms: Vec<Platform> = value
                    .split(',')
                    .filter_map(Platform::from_tag)
                    .collect();
                state.set_platforms(platforms);
            }
            "accounts" => {
                state.account_ids = value
                    .split(',')
                    .filter(|id| !id.is_empty())
                    .map(|id| match decode(id) {
                        Ok(decoded) => decoded.into_owned(),
                        Err(_) => id.to_string(),
                    })
                    .collect();
            }
            "metric" => {
                if let Some(metric) = PrimaryMetric::from_tag(value) {
                    state.primary_metric = metric;
                }
            }
            "tz" => {
                if !value.is_empty() {
                    state.timezone = match decode(value) {
                        Ok(decoded) => decoded.into_owned(),
                        Err(_) => value.to_string(),
                    };
                }
            }
            "refresh" => {
                if let Some(interval) = RefreshInterval::from_tag(value) {
                    state.refresh_interval = interval;
                }
            }
            _ => {}
        }
    }

    if state.time_range == TimeRangePreset::Custom {
        if let (Some(from), Some(to)) = (custom_from, custom_to) {
            if from <= to {
                state.custom_range = Some(DateWindow { from, to });
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn state() -> FilterState {
        FilterState::with_timezone("America/New_York")
    }

    #[test]
    fn defaults() {
        let state = state();
        assert_eq!(state.time_range, TimeRangePreset::D7);
        assert_eq!(state.platforms, Platform::ALL.to_vec());
        assert!(state.account_ids.is_empty());
        assert_eq!(state.primary_metric, PrimaryMetric::Views);
        assert_eq!(state.refresh_interval, RefreshInterval::Off);
    }

    #[test]
    fn empty_platform_selection_resets_to_full_set() {
        let mut state = state();
        state.set_platforms(vec![Platform::TikTok]);
        assert_eq!(state.platforms, vec![Platform::TikTok]);

        state.set_platforms(Vec::new());
        assert_eq!(state.platforms, Platform::ALL.to_vec());
    }

    #[test]
    fn accounts_store_verbatim_including_empty() {
        let mut state = state();
        state.set_accounts(vec!["@acme".into(), "@rival".into()]);
        assert_eq!(state.account_ids, vec!["@acme".to_string(), "@rival".to_string()]);

        // Asymmetric with platforms on purpose: empty accounts stay empty.
        state.set_accounts(Vec::new());
        assert!(state.account_ids.is_empty());
    }

    #[test]
    fn custom_range_forces_custom_preset() {
        let mut state = state();
        let range = DateWindow {
            from: datetime!(2024-01-01 00:00:00 UTC),
            to: datetime!(2024-01-15 00:00:00 UTC),
        };
        state.set_custom_range(Some(range));
        assert_eq!(state.time_range, TimeRangePreset::Custom);
        assert_eq!(state.custom_range, Some(range));
    }

    #[test]
    fn leaving_custom_clears_stored_range() {
        let mut state = state();
        state.set_custom_range(Some(DateWindow {
            from: datetime!(2024-01-01 00:00:00 UTC),
            to: datetime!(2024-01-15 00:00:00 UTC),
        }));

        state.set_time_range(TimeRangePreset::D30);
        assert_eq!(state.time_range, TimeRangePreset::D30);
        assert_eq!(state.custom_range, None);
    }

    #[test]
    fn switching_to_custom_does_not_invent_a_range() {
        let mut state = state();
        state.set_time_range(TimeRangePreset::Custom);
        assert_eq!(state.custom_range, None);

        // Resolver falls back to 7d until the user picks bounds.
        let now = datetime!(2024-03-10 12:00:00 UTC);
        let window = state.date_window(now);
        assert_eq!(window.from, now - time::Duration::days(7));
        assert_eq!(window.to, now);
    }

    #[test]
    fn query_string_round_trips() {
        let mut state = state();
        state.set_time_range(TimeRangePreset::D30);
        state.set_platforms(vec![Platform::Instagram, Platform::YouTube]);
        state.set_accounts(vec!["@acme".into()]);
        state.set_primary_metric(PrimaryMetric::EngagementRate);
        state.set_refresh_interval(RefreshInterval::M5);

        let query = to_query_string(&state);
        let parsed = from_query_string(&query, "UTC");
        assert_eq!(parsed, state);
    }

    #[test]
    fn reserved_characters_in_free_text_round_trip() {
        let mut state = state();
        state.set_accounts(vec![
            "a&b".into(),
            "c=d".into(),
            "team space".into(),
            "x,y".into(),
            "50%".into(),
        ]);
        state.set_timezone("America/Argentina/Buenos_Aires");

        let query = to_query_string(&state);
        let parsed = from_query_string(&query, "UTC");
        assert_eq!(parsed.account_ids, state.account_ids);
        assert_eq!(parsed.timezone, state.timezone);
        // The '&' inside an account id must not split into a bogus pair.
        assert_eq!(parsed, state);
    }

    #[test]
    fn query_string_carries_custom_instants() {
        let mut state = state();
        state.set_custom_range(Some(DateWindow {
            from: datetime!(2024-01-01 00:00:00 UTC),
            to: datetime!(2024-02-01 00:00:00 UTC),
        }));

        let query = to_query_string(&state);
        assert!(query.contains("range=custom"));
        assert!(query.contains("from=2024-01-01T00:00:00Z"));
        assert!(query.contains("to=2024-02-01T00:00:00Z"));

        let parsed = from_query_string(&query, "UTC");
        assert_eq!(parsed.custom_range, state.custom_range);
    }

    #[test]
    fn inbound_parsing_is_tolerant() {
        let parsed = from_query_string(
            "?range=bogus&platforms=myspace&metric=vibes&unknown=1",
            "UTC",
        );
        assert_eq!(parsed.time_range, TimeRangePreset::D7);
        assert_eq!(parsed.platforms, Platform::ALL.to_vec());
        assert_eq!(parsed.primary_metric, PrimaryMetric::Views);
        assert_eq!(parsed.timezone, "UTC");
    }

    #[test]
    fn inverted_custom_pair_is_discarded() {
        let parsed = from_query_string(
            "range=custom&from=2024-02-01T00:00:00Z&to=2024-01-01T00:00:00Z",
            "UTC",
        );
        assert_eq!(parsed.time_range, TimeRangePreset::Custom);
        assert_eq!(parsed.custom_range, None);
    }

    #[test]
    fn custom_instants_ignored_under_other_presets() {
        let parsed = from_query_string(
            "range=7d&from=2024-01-01T00:00:00Z&to=2024-02-01T00:00:00Z",
            "UTC",
        );
        assert_eq!(parsed.custom_range, None);
    }
}
