use dioxus::events::Modifiers;
use dioxus::prelude::*;

use crate::core::filters::Platform;
use crate::core::format;
use crate::core::mock::{MetricsSource, SeriesPoint, MOCK_SOURCE};
use crate::core::timing;
use crate::insights::legend::{use_interactive_legend, InteractiveLegend};
use crate::insights::state::use_insights_filters;

const PLOT_WIDTH: f64 = 640.0;
const PLOT_HEIGHT: f64 = 240.0;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 12.0;
const MARGIN_BOTTOM: f64 = 28.0;

struct PlotLine {
    color: &'static str,
    points: String,
}

/// Primary-metric line chart, one series per selected platform. Legend items
/// toggle on click and isolate on shift-click.
#[component]
pub fn TimeSeriesChart() -> Element {
    let ctx = use_insights_filters();
    let filters = ctx.filters();
    // Any tick change invalidates the rendered series.
    let _tick = ctx.refresh_tick();

    let window = filters.date_window(timing::now());
    let bucket = filters.bucket_type();

    let keys: Vec<&'static str> = filters
        .platforms
        .iter()
        .map(|platform| platform.as_tag())
        .collect();
    let legend = use_interactive_legend(&keys);

    let series: Vec<(Platform, Vec<SeriesPoint>)> = filters
        .platforms
        .iter()
        .map(|platform| {
            (
                *platform,
                MOCK_SOURCE.series(*platform, filters.primary_metric, &window, bucket),
            )
        })
        .collect();

    // Y scale spans every visible series so toggling rescales the chart.
    let max_value = series
        .iter()
        .filter(|(platform, _)| legend.is_visible(platform.as_tag()))
        .flat_map(|(_, points)| points.iter().map(|point| point.value))
        .fold(0.0_f64, f64::max);

    let lines: Vec<PlotLine> = series
        .iter()
        .filter(|(platform, _)| legend.is_visible(platform.as_tag()))
        .map(|(platform, points)| PlotLine {
            color: series_color(*platform),
            points: polyline_points(points, max_value),
        })
        .collect();

    let axis_start = format::format_axis_label(window.from, bucket);
    let axis_end = format::format_axis_label(window.to, bucket);
    let axis_max = if filters.primary_metric.is_rate() {
        format::format_percent(max_value)
    } else {
        format::format_count(max_value)
    };

    let view_box = format!("0 0 {PLOT_WIDTH} {PLOT_HEIGHT}");
    let baseline_y = PLOT_HEIGHT - MARGIN_BOTTOM;
    let right_x = PLOT_WIDTH - MARGIN_RIGHT;
    let label_y = PLOT_HEIGHT - 8.0;
    let max_label_x = MARGIN_LEFT - 6.0;
    let max_label_y = MARGIN_TOP + 10.0;

    rsx! {
        section { class: "insights-card insights-chart",
            div { class: "insights-card__header",
                h2 { "{filters.primary_metric.label()}" }
                span { class: "insights-card__meta",
                    "{filters.time_range.label()} · {bucket.as_tag()} buckets"
                }
            }

            svg {
                class: "insights-chart__plot",
                view_box: "{view_box}",
                preserve_aspect_ratio: "none",

                line {
                    x1: "{MARGIN_LEFT}",
                    y1: "{baseline_y}",
                    x2: "{right_x}",
                    y2: "{baseline_y}",
                    class: "insights-chart__axis",
                }

                for entry in lines.iter() {
                    polyline {
                        points: "{entry.points}",
                        fill: "none",
                        stroke: "{entry.color}",
                        stroke_width: "2",
                    }
                }

                text {
                    x: "{MARGIN_LEFT}",
                    y: "{label_y}",
                    class: "insights-chart__label",
                    "{axis_start}"
                }
                text {
                    x: "{right_x}",
                    y: "{label_y}",
                    text_anchor: "end",
                    class: "insights-chart__label",
                    "{axis_end}"
                }
                text {
                    x: "{max_label_x}",
                    y: "{max_label_y}",
                    text_anchor: "end",
                    class: "insights-chart__label",
                    "{axis_max}"
                }
            }

            div { class: "insights-chart__legend",
                for platform in filters.platforms.iter().copied() {
                    {render_legend_item(legend, platform)}
                }
                if legend.isolated_key().is_some() {
                    span { class: "insights-chart__legend-hint", "shift-click again to restore" }
                }
            }
        }
    }
}

fn render_legend_item(legend: InteractiveLegend, platform: Platform) -> Element {
    let key = platform.as_tag();
    let color = series_color(platform);
    let opacity = legend.opacity_for(key);
    // Dim rather than collapse so the legend keeps its layout.
    let display_opacity = if opacity == 0.0 { 0.35 } else { opacity };

    rsx! {
        button {
            r#type: "button",
            class: "insights-chart__legend-item",
            style: "opacity: {display_opacity}",
            onclick: move |evt| {
                let shift_held = evt.modifiers().contains(Modifiers::SHIFT);
                legend.on_legend_click(key, shift_held);
            },
            span {
                class: "insights-chart__swatch",
                style: "background: {color}",
            }
            "{platform.label()}"
        }
    }
}

fn polyline_points(points: &[SeriesPoint], max_value: f64) -> String {
    if points.is_empty() || max_value <= 0.0 {
        return String::new();
    }

    let inner_width = PLOT_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let inner_height = PLOT_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let step = if points.len() > 1 {
        inner_width / (points.len() - 1) as f64
    } else {
        0.0
    };

    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let x = MARGIN_LEFT + step * index as f64;
            let y = MARGIN_TOP + inner_height * (1.0 - point.value / max_value);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn series_color(platform: Platform) -> &'static str {
    match platform {
        Platform::TikTok => "#22d3ee",
        Platform::Instagram => "#e1558b",
        Platform::YouTube => "#ef4444",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn point(value: f64) -> SeriesPoint {
        SeriesPoint {
            bucket_start: datetime!(2024-03-10 00:00:00 UTC),
            value,
        }
    }

    #[test]
    fn polyline_spans_the_plot_area() {
        let points = vec![point(0.0), point(50.0), point(100.0)];
        let rendered = polyline_points(&points, 100.0);
        let pairs: Vec<&str> = rendered.split(' ').collect();
        assert_eq!(pairs.len(), 3);

        // First point sits at the left margin on the baseline, last at the
        // right edge at full height.
        assert_eq!(pairs[0], "48.0,212.0");
        assert_eq!(pairs[2], "624.0,12.0");
    }

    #[test]
    fn degenerate_inputs_render_nothing() {
        assert_eq!(polyline_points(&[], 100.0), "");
        assert_eq!(polyline_points(&[point(1.0)], 0.0), "");
    }
}
