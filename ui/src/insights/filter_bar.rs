use dioxus::prelude::*;
use time::macros::format_description;
use time::{Date, Duration};

use crate::core::filters::{Platform, PrimaryMetric, RefreshInterval};
use crate::core::timerange::{DateWindow, TimeRangePreset};
use crate::insights::state::{use_insights_filters, InsightsFilters};

/// Filter controls for the insights view: range preset (plus custom date
/// inputs), platform toggles, tracked accounts, metric, and refresh cadence.
#[component]
pub fn FilterBar() -> Element {
    let ctx = use_insights_filters();
    let filters = ctx.filters();

    let is_custom = filters.time_range == TimeRangePreset::Custom;
    let accounts_value = filters.account_ids.join(", ");

    // The picker shows inclusive dates; the stored window end is exclusive.
    let (custom_from, custom_to) = match &filters.custom_range {
        Some(range) => (
            date_input_value(range.from),
            date_input_value(range.to - Duration::days(1)),
        ),
        None => (String::new(), String::new()),
    };

    let mut from_draft = use_signal(|| Option::<Date>::None);
    let mut to_draft = use_signal(|| Option::<Date>::None);

    rsx! {
        section { class: "filter-bar",
            div { class: "filter-bar__group",
                label { class: "filter-bar__label", "Range" }
                select {
                    class: "filter-bar__select",
                    value: "{filters.time_range.as_tag()}",
                    onchange: move |evt| {
                        if let Some(preset) = TimeRangePreset::from_tag(&evt.value()) {
                            ctx.set_time_range(preset);
                        }
                    },
                    for preset in TimeRangePreset::ALL {
                        option {
                            value: "{preset.as_tag()}",
                            selected: filters.time_range == preset,
                            "{preset.label()}"
                        }
                    }
                }

                if is_custom {
                    input {
                        r#type: "date",
                        class: "filter-bar__date",
                        value: "{custom_from}",
                        onchange: move |evt| {
                            from_draft.set(parse_date_input(&evt.value()));
                            apply_custom_range(ctx, from_draft, to_draft);
                        },
                    }
                    span { class: "filter-bar__date-sep", "→" }
                    input {
                        r#type: "date",
                        class: "filter-bar__date",
                        value: "{custom_to}",
                        onchange: move |evt| {
                            to_draft.set(parse_date_input(&evt.value()));
                            apply_custom_range(ctx, from_draft, to_draft);
                        },
                    }
                }
            }

            div { class: "filter-bar__group",
                label { class: "filter-bar__label", "Platforms" }
                div { class: "filter-bar__toggles",
                    for platform in Platform::ALL {
                        {render_platform_toggle(ctx, platform, filters.platforms.contains(&platform))}
                    }
                }
            }

            div { class: "filter-bar__group filter-bar__group--wide",
                label { class: "filter-bar__label", "Accounts" }
                input {
                    r#type: "text",
                    class: "filter-bar__accounts",
                    placeholder: "@handle, @competitor…",
                    value: "{accounts_value}",
                    onchange: move |evt| {
                        let accounts: Vec<String> = evt
                            .value()
                            .split(',')
                            .map(str::trim)
                            .filter(|handle| !handle.is_empty())
                            .map(str::to_string)
                            .collect();
                        ctx.set_accounts(accounts);
                    },
                }
            }

            div { class: "filter-bar__group",
                label { class: "filter-bar__label", "Metric" }
                select {
                    class: "filter-bar__select",
                    value: "{filters.primary_metric.as_tag()}",
                    onchange: move |evt| {
                        if let Some(metric) = PrimaryMetric::from_tag(&evt.value()) {
                            ctx.set_primary_metric(metric);
                        }
                    },
                    for metric in PrimaryMetric::ALL {
                        option {
                            value: "{metric.as_tag()}",
                            selected: filters.primary_metric == metric,
                            "{metric.label()}"
                        }
                    }
                }
            }

            div { class: "filter-bar__group",
                label { class: "filter-bar__label", "Auto-refresh" }
                select {
                    class: "filter-bar__select",
                    value: "{filters.refresh_interval.as_tag()}",
                    onchange: move |evt| {
                        if let Some(interval) = RefreshInterval::from_tag(&evt.value()) {
                            ctx.set_refresh_interval(interval);
                        }
                    },
                    for interval in RefreshInterval::ALL {
                        option {
                            value: "{interval.as_tag()}",
                            selected: filters.refresh_interval == interval,
                            "{interval.label()}"
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "filter-bar__refresh",
                    onclick: move |_| ctx.trigger_refresh(),
                    "Refresh now"
                }
            }

            span { class: "filter-bar__tz", "{filters.timezone}" }
        }
    }
}

fn apply_custom_range(
    ctx: InsightsFilters,
    from_draft: Signal<Option<Date>>,
    to_draft: Signal<Option<Date>>,
) {
    let existing = ctx.filters().custom_range;
    if let Some(window) = merge_custom_drafts(existing.as_ref(), from_draft(), to_draft()) {
        ctx.set_custom_range(Some(window));
    }
}

/// Build the next custom window from the edited date inputs. An untouched
/// input falls back to the bound already stored (a URL-restored range arrives
/// with both drafts empty), so editing a single date takes effect
/// immediately. Inclusive picker dates become a closed-open window.
fn merge_custom_drafts(
    existing: Option<&DateWindow>,
    from_draft: Option<Date>,
    to_draft: Option<Date>,
) -> Option<DateWindow> {
    let from = from_draft.or_else(|| existing.map(|range| range.from.date()))?;
    let to = to_draft.or_else(|| existing.map(|range| (range.to - Duration::days(1)).date()))?;
    if from > to {
        return None;
    }
    Some(DateWindow {
        from: from.midnight().assume_utc(),
        to: to.next_day().unwrap_or(to).midnight().assume_utc(),
    })
}

fn render_platform_toggle(ctx: InsightsFilters, platform: Platform, active: bool) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: format!(
                "filter-bar__toggle {}",
                if active { "filter-bar__toggle--active" } else { "" }
            ),
            onclick: move |_| {
                let mut selection = ctx.filters().platforms;
                if let Some(index) = selection.iter().position(|entry| *entry == platform) {
                    selection.remove(index);
                } else {
                    selection.push(platform);
                }
                // Clearing the last platform falls back to "all" in the store.
                ctx.set_platforms(selection);
            },
            "{platform.label()}"
        }
    }
}

fn parse_date_input(value: &str) -> Option<Date> {
    Date::parse(value, &format_description!("[year]-[month]-[day]")).ok()
}

fn date_input_value(instant: time::OffsetDateTime) -> String {
    instant
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn restored_window() -> DateWindow {
        DateWindow {
            from: datetime!(2024-01-08 00:00:00 UTC),
            to: datetime!(2024-01-22 00:00:00 UTC),
        }
    }

    #[test]
    fn editing_one_date_keeps_the_other_bound() {
        let existing = restored_window();

        // Only the end date was touched; the start carries over.
        let merged =
            merge_custom_drafts(Some(&existing), None, Some(date!(2024 - 01 - 30))).unwrap();
        assert_eq!(merged.from, existing.from);
        assert_eq!(merged.to, datetime!(2024-01-31 00:00:00 UTC));

        // And the mirror case for the start date.
        let merged =
            merge_custom_drafts(Some(&existing), Some(date!(2024 - 01 - 01)), None).unwrap();
        assert_eq!(merged.from, datetime!(2024-01-01 00:00:00 UTC));
        assert_eq!(merged.to, existing.to);
    }

    #[test]
    fn both_drafts_build_a_closed_open_window() {
        let merged = merge_custom_drafts(
            None,
            Some(date!(2024 - 03 - 01)),
            Some(date!(2024 - 03 - 01)),
        )
        .unwrap();
        // A single picked day spans that whole day.
        assert_eq!(merged.from, datetime!(2024-03-01 00:00:00 UTC));
        assert_eq!(merged.to, datetime!(2024-03-02 00:00:00 UTC));
    }

    #[test]
    fn incomplete_or_inverted_edits_change_nothing() {
        assert_eq!(merge_custom_drafts(None, Some(date!(2024 - 03 - 01)), None), None);
        assert_eq!(merge_custom_drafts(None, None, Some(date!(2024 - 03 - 01))), None);
        assert_eq!(
            merge_custom_drafts(
                None,
                Some(date!(2024 - 03 - 10)),
                Some(date!(2024 - 03 - 01)),
            ),
            None
        );
    }
}
