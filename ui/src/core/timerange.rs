//! Time-range presets and the resolver that turns them into concrete windows.
//!
//! Everything here is pure: the caller supplies `now`, so chart code and tests
//! resolve the same preset to the same window.

use time::{Date, Duration, Month, OffsetDateTime, Time};

/// Named time-range shorthand offered by the range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRangePreset {
    H6,
    H12,
    H24,
    D2,
    #[default]
    D7,
    D30,
    D90,
    M6,
    Y1,
    Yesterday,
    Custom,
}

/// Bucket width used to group points along a chart's time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketType {
    Hourly,
    Daily,
    Weekly,
}

/// Closed-open instant interval `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: OffsetDateTime,
    pub to: OffsetDateTime,
}

impl TimeRangePreset {
    pub const ALL: [TimeRangePreset; 11] = [
        Self::H6,
        Self::H12,
        Self::H24,
        Self::D2,
        Self::D7,
        Self::D30,
        Self::D90,
        Self::M6,
        Self::Y1,
        Self::Yesterday,
        Self::Custom,
    ];

    /// Stable tag used in the URL query string.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::H6 => "6h",
            Self::H12 => "12h",
            Self::H24 => "24h",
            Self::D2 => "2d",
            Self::D7 => "7d",
            Self::D30 => "30d",
            Self::D90 => "90d",
            Self::M6 => "6m",
            Self::Y1 => "1y",
            Self::Yesterday => "yesterday",
            Self::Custom => "custom",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.as_tag() == tag)
    }

    /// Human label for the range selector dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::H6 => "Last 6 hours",
            Self::H12 => "Last 12 hours",
            Self::H24 => "Last 24 hours",
            Self::D2 => "Last 2 days",
            Self::D7 => "Last 7 days",
            Self::D30 => "Last 30 days",
            Self::D90 => "Last 90 days",
            Self::M6 => "Last 6 months",
            Self::Y1 => "Last year",
            Self::Yesterday => "Yesterday",
            Self::Custom => "Custom range",
        }
    }
}

impl BucketType {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Width of one bucket, used to step across a window when building an axis.
    pub fn step(&self) -> Duration {
        match self {
            Self::Hourly => Duration::hours(1),
            Self::Daily => Duration::days(1),
            Self::Weekly => Duration::weeks(1),
        }
    }
}

/// Bucket granularity for a preset. Fixed table, no heuristics.
pub fn bucket_for(preset: TimeRangePreset) -> BucketType {
    match preset {
        TimeRangePreset::H6 | TimeRangePreset::H12 | TimeRangePreset::H24 => BucketType::Hourly,
        TimeRangePreset::D2
        | TimeRangePreset::D7
        | TimeRangePreset::D30
        | TimeRangePreset::D90
        | TimeRangePreset::Yesterday
        | TimeRangePreset::Custom => BucketType::Daily,
        TimeRangePreset::M6 | TimeRangePreset::Y1 => BucketType::Weekly,
    }
}

/// Resolve a preset to a concrete `[from, to)` window.
///
/// `Custom` uses the supplied range; when none is set it falls back to the
/// 7-day window rather than producing an undefined one.
pub fn resolve_window(
    preset: TimeRangePreset,
    custom: Option<&DateWindow>,
    now: OffsetDateTime,
) -> DateWindow {
    match preset {
        TimeRangePreset::H6 => trailing(now, Duration::hours(6)),
        TimeRangePreset::H12 => trailing(now, Duration::hours(12)),
        TimeRangePreset::H24 => trailing(now, Duration::hours(24)),
        TimeRangePreset::D2 => trailing(now, Duration::days(2)),
        TimeRangePreset::D7 => trailing(now, Duration::days(7)),
        TimeRangePreset::D30 => trailing(now, Duration::days(30)),
        TimeRangePreset::D90 => trailing(now, Duration::days(90)),
        TimeRangePreset::M6 => DateWindow {
            from: shift_months(now, 6),
            to: now,
        },
        TimeRangePreset::Y1 => DateWindow {
            from: shift_months(now, 12),
            to: now,
        },
        TimeRangePreset::Yesterday => {
            let today = now.replace_time(Time::MIDNIGHT);
            DateWindow {
                from: today - Duration::days(1),
                to: today,
            }
        }
        TimeRangePreset::Custom => match custom {
            Some(range) => *range,
            None => trailing(now, Duration::days(7)),
        },
    }
}

fn trailing(now: OffsetDateTime, span: Duration) -> DateWindow {
    DateWindow {
        from: now - span,
        to: now,
    }
}

/// Step `months` whole calendar months back, clamping the day-of-month to the
/// target month's length (Mar 31 minus one month lands on the end of Feb).
fn shift_months(instant: OffsetDateTime, months: u32) -> OffsetDateTime {
    let mut year = instant.year();
    let mut month = instant.month() as i32;

    month -= months as i32;
    while month < 1 {
        month += 12;
        year -= 1;
    }

    // month is back in 1..=12 here, so the conversion cannot fail.
    let month = Month::try_from(month as u8).unwrap_or(Month::January);
    let last_day = time::util::days_in_year_month(year, month);
    let day = instant.day().min(last_day);

    match Date::from_calendar_date(year, month, day) {
        Ok(date) => instant.replace_date(date),
        Err(_) => instant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn trailing_presets_anchor_to_now() {
        let now = datetime!(2024-03-10 12:00:00 UTC);

        let cases = [
            (TimeRangePreset::H6, Duration::hours(6)),
            (TimeRangePreset::H12, Duration::hours(12)),
            (TimeRangePreset::H24, Duration::hours(24)),
            (TimeRangePreset::D2, Duration::days(2)),
            (TimeRangePreset::D7, Duration::days(7)),
            (TimeRangePreset::D30, Duration::days(30)),
            (TimeRangePreset::D90, Duration::days(90)),
        ];

        for (preset, span) in cases {
            let window = resolve_window(preset, None, now);
            assert_eq!(window.to, now, "{}", preset.as_tag());
            assert_eq!(window.from, now - span, "{}", preset.as_tag());
        }
    }

    #[test]
    fn last_24h_example_window() {
        let now = datetime!(2024-03-10 12:00:00 UTC);
        let window = resolve_window(TimeRangePreset::H24, None, now);
        assert_eq!(window.from, datetime!(2024-03-09 12:00:00 UTC));
        assert_eq!(window.to, datetime!(2024-03-10 12:00:00 UTC));
        assert_eq!(bucket_for(TimeRangePreset::H24), BucketType::Hourly);
    }

    #[test]
    fn yesterday_spans_previous_calendar_day() {
        for now in [
            datetime!(2024-03-10 00:00:01 UTC),
            datetime!(2024-03-10 12:34:56 UTC),
            datetime!(2024-03-10 23:59:59 UTC),
        ] {
            let window = resolve_window(TimeRangePreset::Yesterday, None, now);
            assert_eq!(window.from, datetime!(2024-03-09 00:00:00 UTC));
            assert_eq!(window.to, datetime!(2024-03-10 00:00:00 UTC));
        }
    }

    #[test]
    fn yesterday_respects_local_offset() {
        let now = datetime!(2024-03-10 01:30:00 -5);
        let window = resolve_window(TimeRangePreset::Yesterday, None, now);
        assert_eq!(window.from, datetime!(2024-03-09 00:00:00 -5));
        assert_eq!(window.to, datetime!(2024-03-10 00:00:00 -5));
    }

    #[test]
    fn custom_without_range_falls_back_to_seven_days() {
        let now = datetime!(2024-03-10 12:00:00 UTC);
        let fallback = resolve_window(TimeRangePreset::Custom, None, now);
        let seven = resolve_window(TimeRangePreset::D7, None, now);
        assert_eq!(fallback, seven);
    }

    #[test]
    fn custom_with_range_passes_through() {
        let now = datetime!(2024-03-10 12:00:00 UTC);
        let range = DateWindow {
            from: datetime!(2024-01-01 00:00:00 UTC),
            to: datetime!(2024-02-01 00:00:00 UTC),
        };
        assert_eq!(resolve_window(TimeRangePreset::Custom, Some(&range), now), range);
    }

    #[test]
    fn month_shift_clamps_day_of_month() {
        // Aug 31 minus 6 months: Feb has no 31st, clamp to the 29th (leap year).
        let now = datetime!(2024-08-31 10:00:00 UTC);
        let window = resolve_window(TimeRangePreset::M6, None, now);
        assert_eq!(window.from, datetime!(2024-02-29 10:00:00 UTC));
        assert_eq!(window.to, now);
    }

    #[test]
    fn year_shift_crosses_year_boundary() {
        let now = datetime!(2024-03-10 12:00:00 UTC);
        let window = resolve_window(TimeRangePreset::Y1, None, now);
        assert_eq!(window.from, datetime!(2023-03-10 12:00:00 UTC));
    }

    #[test]
    fn bucket_table_matches_presets() {
        assert_eq!(bucket_for(TimeRangePreset::H6), BucketType::Hourly);
        assert_eq!(bucket_for(TimeRangePreset::D7), BucketType::Daily);
        assert_eq!(bucket_for(TimeRangePreset::Yesterday), BucketType::Daily);
        assert_eq!(bucket_for(TimeRangePreset::Custom), BucketType::Daily);
        assert_eq!(bucket_for(TimeRangePreset::M6), BucketType::Weekly);
        assert_eq!(bucket_for(TimeRangePreset::Y1), BucketType::Weekly);
    }

    #[test]
    fn tags_round_trip() {
        for preset in TimeRangePreset::ALL {
            assert_eq!(TimeRangePreset::from_tag(preset.as_tag()), Some(preset));
        }
        assert_eq!(TimeRangePreset::from_tag("fortnight"), None);
    }
}
