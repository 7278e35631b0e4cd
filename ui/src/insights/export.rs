use dioxus::prelude::*;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use crate::core::filters::{Platform, PrimaryMetric};
use crate::core::mock::{MetricsSource, MOCK_SOURCE};
use crate::core::timing;
use crate::insights::state::use_insights_filters;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Done(String),
    Error(String),
}

/// Everything a teammate needs to reproduce the current view: the selections
/// plus the aggregates they resolve to.
#[derive(Serialize)]
struct InsightsSnapshot {
    generated_at: String,
    range: String,
    window_from: String,
    window_to: String,
    bucket: String,
    timezone: String,
    accounts: Vec<String>,
    platforms: Vec<PlatformTotals>,
}

#[derive(Serialize)]
struct PlatformTotals {
    platform: Platform,
    metric: PrimaryMetric,
    total: f64,
    per_bucket: f64,
}

/// Copy-paste JSON export of the current dashboard snapshot.
#[component]
pub fn SnapshotExportPanel() -> Element {
    let ctx = use_insights_filters();
    let mut status = use_signal(|| ExportStatus::Idle);

    let on_export = move |_| {
        let filters = ctx.filters();
        let now = timing::now();
        let window = filters.date_window(now);
        let bucket = filters.bucket_type();

        let platforms = filters
            .platforms
            .iter()
            .map(|platform| {
                let points = MOCK_SOURCE.series(*platform, filters.primary_metric, &window, bucket);
                let total: f64 = points.iter().map(|point| point.value).sum();
                let per_bucket = if points.is_empty() {
                    0.0
                } else {
                    total / points.len() as f64
                };
                PlatformTotals {
                    platform: *platform,
                    metric: filters.primary_metric,
                    total,
                    per_bucket,
                }
            })
            .collect();

        let snapshot = InsightsSnapshot {
            generated_at: now.format(&Rfc3339).unwrap_or_default(),
            range: filters.time_range.as_tag().to_string(),
            window_from: window.from.format(&Rfc3339).unwrap_or_default(),
            window_to: window.to.format(&Rfc3339).unwrap_or_default(),
            bucket: bucket.as_tag().to_string(),
            timezone: filters.timezone.clone(),
            accounts: filters.account_ids.clone(),
            platforms,
        };

        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => status.set(ExportStatus::Done(json)),
            Err(err) => status.set(ExportStatus::Error(format!("Couldn't serialise snapshot: {err}"))),
        }
    };

    let state = status();

    rsx! {
        section { class: "insights-card insights-export",
            div { class: "insights-card__header",
                h2 { "Export" }
                button {
                    r#type: "button",
                    class: "insights-export__button",
                    onclick: on_export,
                    "Snapshot as JSON"
                }
            }

            match state {
                ExportStatus::Idle => rsx! {
                    p { class: "insights-card__placeholder",
                        "Capture the current filters and aggregates as JSON to share or file."
                    }
                },
                ExportStatus::Done(json) => rsx! {
                    textarea {
                        class: "insights-export__output",
                        readonly: true,
                        rows: "12",
                        value: "{json}",
                    }
                },
                ExportStatus::Error(err) => rsx! {
                    p { class: "insights-card__error", "⚠️ {err}" }
                },
            }
        }
    }
}
