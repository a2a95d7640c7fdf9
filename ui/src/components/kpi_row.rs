//! The three turnout KPI cards.

use dioxus::prelude::*;

use crate::charts::palette;
use crate::core::aggregate::KpiSummary;
use crate::core::format;

fn kpi_value(value: Option<f64>) -> String {
    value
        .map(format::format_pct)
        .unwrap_or_else(|| "N/A".to_string())
}

#[component]
pub fn KpiRow(summary: KpiSummary) -> Element {
    let cards = [
        ("Overall Turnout", kpi_value(summary.overall), palette::OVERALL),
        ("Male Turnout", kpi_value(summary.male), palette::MALE),
        ("Female Turnout", kpi_value(summary.female), palette::FEMALE_KPI),
    ];

    rsx! {
        div { class: "kpi-row",
            for (caption, value, color) in cards {
                div { key: "{caption}", class: "kpi",
                    h3 { class: "kpi__value", style: "color: {color}", "{value}" }
                    p { class: "kpi__caption", "{caption}" }
                }
            }
        }
    }
}
