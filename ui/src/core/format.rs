//! Formatting helpers for presenting metric values and axis labels.

use time::macros::format_description;
use time::OffsetDateTime;

use super::timerange::BucketType;

/// Compact count formatting: `982`, `12.4K`, `3.1M`.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value * 100.0)
    } else {
        "—".to_string()
    }
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        "—".to_string()
    }
}

/// X-axis label for a bucket start: hour-of-day for hourly buckets, short
/// dates otherwise.
pub fn format_axis_label(instant: OffsetDateTime, bucket: BucketType) -> String {
    let description = match bucket {
        BucketType::Hourly => format_description!("[hour]:[minute]"),
        BucketType::Daily | BucketType::Weekly => {
            format_description!("[month repr:short] [day padding:none]")
        }
    };
    instant
        .format(&description)
        .unwrap_or_else(|_| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn counts_collapse_to_compact_units() {
        assert_eq!(format_count(982.0), "982");
        assert_eq!(format_count(12_400.0), "12.4K");
        assert_eq!(format_count(3_100_000.0), "3.1M");
        assert_eq!(format_count(f64::NAN), "—");
    }

    #[test]
    fn percents_render_one_decimal() {
        assert_eq!(format_percent(0.0421), "4.2%");
        assert_eq!(format_percent(f64::INFINITY), "—");
    }

    #[test]
    fn axis_labels_follow_bucket_granularity() {
        let instant = datetime!(2024-03-09 14:00:00 UTC);
        assert_eq!(format_axis_label(instant, BucketType::Hourly), "14:00");
        assert_eq!(format_axis_label(instant, BucketType::Daily), "Mar 9");
        assert_eq!(format_axis_label(instant, BucketType::Weekly), "Mar 9");
    }
}
