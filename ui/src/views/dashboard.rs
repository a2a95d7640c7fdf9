//! The dashboard view: filters, KPI cards and the four linked charts.
//!
//! All interaction funnels through one coroutine. Dropdowns and chart clicks
//! send [`SelectionEvent`]s; the coroutine validates them against the dataset
//! and only commits the selection signal when something actually changed, so
//! ignored events never trigger a re-render.

use dioxus::prelude::*;
use futures_util::StreamExt;

use api::TurnoutDataset;

use crate::charts::{constituency_bars, gender_bars, gender_trend, overall_trend};
use crate::components::{FacetedBarChart, FilterBar, GroupedBarChart, KpiRow, LineChart};
use crate::core::aggregate;
use crate::core::selection::{Selection, SelectionEvent};

#[component]
pub fn Dashboard() -> Element {
    let dataset = use_resource(|| async move { api::fetch_dataset().await });

    // Bound so the read guard drops before `dataset` at the end of the body.
    let body = match &*dataset.read() {
        Some(Ok(data)) => rsx! {
            DashboardLoaded { dataset: data.clone() }
        },
        Some(Err(err)) => rsx! {
            section { class: "dashboard dashboard--empty",
                h2 { "Turnout data unavailable" }
                p { class: "dashboard__error", "{err}" }
            }
        },
        None => rsx! {
            section { class: "dashboard dashboard--empty",
                p { "Loading turnout data..." }
            }
        },
    };
    body
}

#[component]
fn DashboardLoaded(dataset: TurnoutDataset) -> Element {
    let selection = use_signal(Selection::default);

    let events = {
        let dataset_for_loop = dataset.clone();
        let selection_ref = selection.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<SelectionEvent>| {
            let dataset = dataset_for_loop.clone();
            let mut selection = selection_ref.clone();
            async move {
                while let Some(event) = rx.next().await {
                    let mut next = selection.peek().clone();
                    if next.apply(event, &dataset) {
                        selection.set(next);
                    }
                }
            }
        })
    };

    let current = selection();
    let summary = aggregate::kpi_summary(&dataset, &current);
    let overall = overall_trend(&dataset, &current);
    let genders = gender_trend(&dataset, &current);
    let by_constituency = constituency_bars(&dataset, &current);
    let gender_split = gender_bars(&dataset, &current);

    // Dropdown options are alphabetical; chart ordering stays data-driven.
    let mut constituency_options = dataset.constituencies().to_vec();
    constituency_options.sort();

    rsx! {
        section { class: "dashboard",
            h2 { class: "dashboard__title",
                "Voter Turnout Dashboard (10 Constituencies, 3 General Elections)"
            }

            FilterBar {
                years: dataset.years().to_vec(),
                constituencies: constituency_options,
                selection: current,
                on_event: move |event| events.send(event),
            }

            KpiRow { summary }

            div { class: "dashboard__grid",
                div { class: "dashboard__panel",
                    h4 { "1. Change in overall turnout ratio over time" }
                    LineChart {
                        spec: overall,
                        on_click: move |target| events.send(SelectionEvent::ChartClick(target)),
                    }
                }
                div { class: "dashboard__panel",
                    h4 { "2. Change in turnout ratio across genders over time" }
                    LineChart {
                        spec: genders,
                        on_click: move |target| events.send(SelectionEvent::ChartClick(target)),
                    }
                }
                div { class: "dashboard__panel",
                    h4 { "3. Turnout distribution across constituencies and time" }
                    GroupedBarChart {
                        spec: by_constituency,
                        on_click: move |target| events.send(SelectionEvent::ChartClick(target)),
                    }
                }
                div { class: "dashboard__panel",
                    h4 { "4. Turnout distribution across constituencies and genders" }
                    FacetedBarChart {
                        spec: gender_split,
                        on_click: move |target| events.send(SelectionEvent::ChartClick(target)),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use api::{Gender, TurnoutRecord, Year};

    fn rec(
        constituency: &str,
        year: Year,
        gender: Gender,
        electors: u64,
        votes: u64,
    ) -> TurnoutRecord {
        TurnoutRecord {
            year,
            constituency: constituency.to_string(),
            gender,
            electors,
            votes_polled: votes,
        }
    }

    fn loaded_app() -> Element {
        let dataset = TurnoutDataset::new(vec![
            rec("Rampur", Year::Y2014, Gender::Male, 1_000, 600),
            rec("Rampur", Year::Y2014, Gender::Female, 900, 500),
            rec("Rampur", Year::Y2019, Gender::Male, 1_100, 700),
            rec("Rampur", Year::Y2019, Gender::Female, 950, 600),
            rec("Sitapur", Year::Y2014, Gender::Male, 800, 400),
            rec("Sitapur", Year::Y2014, Gender::Female, 700, 350),
            rec("Sitapur", Year::Y2019, Gender::Male, 850, 500),
            rec("Sitapur", Year::Y2019, Gender::Female, 750, 450),
        ])
        .unwrap();
        rsx! { DashboardLoaded { dataset } }
    }

    // Renders the whole loaded subtree: signal, coroutine, filters, KPIs and
    // all four charts.
    #[test]
    fn loaded_dashboard_builds_every_panel() {
        let mut dom = VirtualDom::new(loaded_app);
        dom.rebuild_in_place();
    }
}
