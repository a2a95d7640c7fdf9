//! SVG renderer for [`FacetedBarSpec`]. One panel per year on a shared
//! y axis, Plotly-style `Year=…` headers above each panel.

use dioxus::prelude::*;

use api::Year;

use crate::charts::{palette, FacetedBarSpec};
use crate::core::format;
use crate::core::selection::ClickTarget;

use super::scale::{project, ticks};

const VIEW_W: f64 = 960.0;
const VIEW_H: f64 = 420.0;
const PLOT_LEFT: f64 = 56.0;
const PLOT_RIGHT: f64 = VIEW_W - 20.0;
const PLOT_TOP: f64 = 48.0;
const PLOT_BOTTOM: f64 = VIEW_H - 96.0;
const PANEL_GAP: f64 = 24.0;
const GROUP_FILL: f64 = 0.8;

struct FacetBarGeom {
    suffix: &'static str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
    tooltip: String,
}

struct FacetGroupGeom {
    constituency: String,
    opacity: f64,
    label_x: f64,
    label_y: f64,
    label_transform: String,
    bars: Vec<FacetBarGeom>,
}

struct PanelGeom {
    year: Year,
    header: String,
    header_x: f64,
    left: f64,
    right: f64,
    groups: Vec<FacetGroupGeom>,
}

struct Gridline {
    y: f64,
    text_y: f64,
    label: String,
}

#[component]
pub fn FacetedBarChart(spec: FacetedBarSpec, on_click: EventHandler<ClickTarget>) -> Element {
    let y_range = (PLOT_BOTTOM, PLOT_TOP);
    let panel_count = spec.panels.len();
    let panel_width = if panel_count == 0 {
        0.0
    } else {
        (PLOT_RIGHT - PLOT_LEFT - PANEL_GAP * (panel_count as f64 - 1.0)) / panel_count as f64
    };

    let panels: Vec<PanelGeom> = spec
        .panels
        .iter()
        .enumerate()
        .map(|(panel_index, panel)| {
            let left = PLOT_LEFT + panel_index as f64 * (panel_width + PANEL_GAP);
            let right = left + panel_width;
            let slots = panel.groups.len();
            let slot_width = if slots == 0 {
                0.0
            } else {
                panel_width / slots as f64
            };
            let bar_width = slot_width * GROUP_FILL / 2.0;

            let groups = panel
                .groups
                .iter()
                .enumerate()
                .map(|(slot, group)| {
                    let center = left + (slot as f64 + 0.5) * slot_width;
                    let first_x = center - slot_width * GROUP_FILL / 2.0;
                    let bars = [
                        ("m", "Male", palette::MALE, group.male),
                        ("f", "Female", palette::FEMALE, group.female),
                    ]
                    .into_iter()
                    .enumerate()
                    .map(|(index, (suffix, gender, color, ratio))| {
                        let y = project(ratio, spec.y_domain, y_range);
                        FacetBarGeom {
                            suffix,
                            x: first_x + index as f64 * bar_width,
                            y,
                            width: bar_width,
                            height: PLOT_BOTTOM - y,
                            color,
                            tooltip: format!(
                                "{} {} {}: {}",
                                group.constituency,
                                panel.year,
                                gender,
                                format::format_pct(ratio)
                            ),
                        }
                    })
                    .collect();
                    let label_y = PLOT_BOTTOM + 16.0;
                    FacetGroupGeom {
                        constituency: group.constituency.clone(),
                        opacity: if group.emphasized {
                            palette::FULL_OPACITY
                        } else {
                            palette::DIM_OPACITY
                        },
                        label_x: center,
                        label_y,
                        label_transform: format!("rotate(-35 {center:.1} {label_y:.1})"),
                        bars,
                    }
                })
                .collect();

            PanelGeom {
                year: panel.year,
                header: format!("Year={}", panel.year),
                header_x: (left + right) / 2.0,
                left,
                right,
                groups,
            }
        })
        .collect();

    let gridlines: Vec<Gridline> = ticks(spec.y_domain)
        .into_iter()
        .map(|tick| {
            let y = project(tick, spec.y_domain, y_range);
            Gridline {
                y,
                text_y: y + 4.0,
                label: format::format_tick(tick),
            }
        })
        .collect();

    let legend: Vec<(f64, f64, &str, &'static str)> = spec
        .legend
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let swatch_x = PLOT_RIGHT - 64.0 * (spec.legend.len() - index) as f64;
            (swatch_x, swatch_x + 16.0, entry.label.as_str(), entry.color)
        })
        .collect();

    let y_tick_x = PLOT_LEFT - 8.0;
    let header_y = PLOT_TOP - 8.0;
    let x_label_x = (PLOT_LEFT + PLOT_RIGHT) / 2.0;
    let x_label_y = VIEW_H - 10.0;
    let y_mid = (PLOT_TOP + PLOT_BOTTOM) / 2.0;

    rsx! {
        svg {
            class: "chart chart--facets",
            view_box: "0 0 {VIEW_W} {VIEW_H}",
            role: "img",
            "aria-label": "{spec.title}",

            text { class: "chart__title", x: "{PLOT_LEFT}", y: "22", "{spec.title}" }

            for grid in gridlines {
                line {
                    class: "chart__gridline",
                    x1: "{PLOT_LEFT}",
                    y1: "{grid.y}",
                    x2: "{PLOT_RIGHT}",
                    y2: "{grid.y}",
                }
                text { class: "chart__tick chart__tick--y", x: "{y_tick_x}", y: "{grid.text_y}", "{grid.label}" }
            }

            for panel in panels.iter() {
                text {
                    key: "hdr-{panel.year}",
                    class: "chart__facet-header",
                    x: "{panel.header_x}",
                    y: "{header_y}",
                    "{panel.header}"
                }
                line {
                    key: "axis-{panel.year}",
                    class: "chart__axis",
                    x1: "{panel.left}",
                    y1: "{PLOT_BOTTOM}",
                    x2: "{panel.right}",
                    y2: "{PLOT_BOTTOM}",
                }
                for group in panel.groups.iter() {
                    for bar in group.bars.iter() {
                        rect {
                            key: "bar-{panel.year}-{group.constituency}-{bar.suffix}",
                            class: "chart__bar",
                            x: "{bar.x}",
                            y: "{bar.y}",
                            width: "{bar.width}",
                            height: "{bar.height}",
                            fill: bar.color,
                            style: "opacity: {group.opacity}",
                            onclick: {
                                let constituency = group.constituency.clone();
                                let year = panel.year;
                                move |_| {
                                    on_click.call(ClickTarget::ConstituencyBar {
                                        constituency: constituency.clone(),
                                        year,
                                    })
                                }
                            },
                            title { "{bar.tooltip}" }
                        }
                    }
                    text {
                        key: "tick-{panel.year}-{group.constituency}",
                        class: "chart__tick chart__tick--rotated",
                        x: "{group.label_x}",
                        y: "{group.label_y}",
                        transform: "{group.label_transform}",
                        style: "opacity: {group.opacity}",
                        "{group.constituency}"
                    }
                }
            }

            for (swatch_x, label_x, label, color) in legend {
                rect {
                    key: "lg-swatch-{label}",
                    class: "chart__legend-swatch",
                    x: "{swatch_x}",
                    y: "14",
                    width: "12",
                    height: "12",
                    fill: color,
                }
                text {
                    key: "lg-label-{label}",
                    class: "chart__legend-label",
                    x: "{label_x}",
                    y: "24",
                    "{label}"
                }
            }

            text { class: "chart__axis-label chart__axis-label--x", x: "{x_label_x}", y: "{x_label_y}", "{spec.x_label}" }
            text {
                class: "chart__axis-label chart__axis-label--y",
                x: "16",
                y: "{y_mid}",
                transform: "rotate(-90 16 {y_mid})",
                "{spec.y_label}"
            }
        }
    }
}
