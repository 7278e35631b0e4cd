use dioxus::prelude::*;

use crate::core::filters::Platform;
use crate::core::format;
use crate::core::mock::{MetricsSource, MOCK_SOURCE};
use crate::core::timing;
use crate::insights::state::use_insights_filters;

/// Aggregate highlight cards above the chart: combined total, per-bucket
/// average, and the strongest platform for the current window.
#[component]
pub fn HighlightCards() -> Element {
    let ctx = use_insights_filters();
    let filters = ctx.filters();
    let _tick = ctx.refresh_tick();

    let window = filters.date_window(timing::now());
    let bucket = filters.bucket_type();
    let metric = filters.primary_metric;

    let mut combined_total = 0.0_f64;
    let mut combined_points = 0_usize;
    let mut top_platform: Option<(Platform, f64)> = None;

    for platform in &filters.platforms {
        let points = MOCK_SOURCE.series(*platform, metric, &window, bucket);
        let total: f64 = points.iter().map(|point| point.value).sum();
        combined_total += total;
        combined_points += points.len();

        let leads = top_platform
            .map(|(_, best)| total > best)
            .unwrap_or(true);
        if leads {
            top_platform = Some((*platform, total));
        }
    }

    let per_bucket = if combined_points > 0 {
        combined_total / combined_points as f64
    } else {
        f64::NAN
    };

    // Rates average; counts sum. Summing a rate across buckets is meaningless.
    let total_display = if metric.is_rate() {
        format::format_percent(per_bucket)
    } else {
        format::format_count(combined_total)
    };
    let total_label = if metric.is_rate() { "Average" } else { "Total" };

    let per_bucket_display = if metric.is_rate() {
        format::format_percent(per_bucket)
    } else {
        format::format_count(per_bucket)
    };

    let top_platform_label = match top_platform {
        Some((platform, _)) => platform.label(),
        None => "—",
    };

    let accounts_meta = if filters.account_ids.is_empty() {
        "All tracked accounts".to_string()
    } else {
        format!("{} selected accounts", filters.account_ids.len())
    };

    rsx! {
        section { class: "insights-card insights-highlights",
            div { class: "insights-card__header",
                h2 { "Highlights" }
                span { class: "insights-card__meta", "{accounts_meta}" }
            }

            // A zero-width custom window resolves to zero buckets.
            if combined_points == 0 {
                p { class: "insights-card__placeholder",
                    "No data points in the selected window."
                }
            } else {
                div { class: "insights-highlights__row",
                    div { class: "insights-highlight",
                        span { class: "insights-highlight__label", "{total_label} {metric.label()}" }
                        strong { class: "insights-highlight__value", "{total_display}" }
                        span { class: "insights-highlight__meta", "{filters.time_range.label()}" }
                    }
                    div { class: "insights-highlight",
                        span { class: "insights-highlight__label", "Per {bucket.as_tag()} bucket" }
                        strong { class: "insights-highlight__value", "{per_bucket_display}" }
                        span { class: "insights-highlight__meta",
                            "{filters.platforms.len()} platforms combined"
                        }
                    }
                    div { class: "insights-highlight",
                        span { class: "insights-highlight__label", "Top platform" }
                        strong { class: "insights-highlight__value", "{top_platform_label}" }
                        span { class: "insights-highlight__meta", "By {metric.label()}" }
                    }
                }
            }
        }
    }
}
