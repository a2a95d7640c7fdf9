//! Year and constituency dropdowns above the KPI row.

use dioxus::prelude::*;

use api::Year;

use crate::core::selection::{Selection, SelectionEvent};

#[component]
pub fn FilterBar(
    years: Vec<Year>,
    constituencies: Vec<String>,
    selection: Selection,
    on_event: EventHandler<SelectionEvent>,
) -> Element {
    let year_value = selection
        .year
        .map(|year| year.to_string())
        .unwrap_or_default();
    let constituency_value = selection.constituency.clone().unwrap_or_default();

    rsx! {
        div { class: "filters",
            div { class: "filters__group",
                label { class: "filters__label", r#for: "year-filter", "Select Year:" }
                select {
                    id: "year-filter",
                    class: "filters__select",
                    value: "{year_value}",
                    oninput: move |event| {
                        let raw = event.value();
                        if raw.is_empty() {
                            on_event.call(SelectionEvent::YearFilter(None));
                        } else if let Some(year) = raw.parse::<u16>().ok().and_then(Year::from_u16) {
                            on_event.call(SelectionEvent::YearFilter(Some(year)));
                        }
                    },
                    option { value: "", "All years" }
                    for year in years.iter().copied() {
                        option { key: "{year}", value: "{year}", "{year}" }
                    }
                }
            }
            div { class: "filters__group filters__group--wide",
                label {
                    class: "filters__label",
                    r#for: "constituency-filter",
                    "Select Constituency:"
                }
                select {
                    id: "constituency-filter",
                    class: "filters__select",
                    value: "{constituency_value}",
                    oninput: move |event| {
                        let raw = event.value();
                        if raw.is_empty() {
                            on_event.call(SelectionEvent::ConstituencyFilter(None));
                        } else {
                            on_event.call(SelectionEvent::ConstituencyFilter(Some(raw)));
                        }
                    },
                    option { value: "", "All constituencies" }
                    for name in constituencies.iter() {
                        option { key: "{name}", value: "{name}", "{name}" }
                    }
                }
            }
        }
    }
}
