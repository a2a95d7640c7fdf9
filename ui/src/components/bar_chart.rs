//! SVG renderer for [`BarChartSpec`].

use dioxus::prelude::*;

use api::Year;

use crate::charts::{palette, BarChartSpec};
use crate::core::format;
use crate::core::selection::ClickTarget;

use super::scale::{project, slot_center, ticks};

const VIEW_W: f64 = 960.0;
const VIEW_H: f64 = 420.0;
const PLOT_LEFT: f64 = 56.0;
const PLOT_RIGHT: f64 = VIEW_W - 20.0;
const PLOT_TOP: f64 = 40.0;
const PLOT_BOTTOM: f64 = VIEW_H - 96.0;

/// Share of each constituency slot covered by bars, the rest is gutter.
const GROUP_FILL: f64 = 0.8;

struct BarGeom {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: &'static str,
    opacity: f64,
    year: Year,
    tooltip: String,
}

struct GroupGeom {
    constituency: String,
    label_x: f64,
    label_y: f64,
    label_transform: String,
    label_opacity: f64,
    bars: Vec<BarGeom>,
}

struct Gridline {
    y: f64,
    text_y: f64,
    label: String,
}

#[component]
pub fn GroupedBarChart(spec: BarChartSpec, on_click: EventHandler<ClickTarget>) -> Element {
    let x_range = (PLOT_LEFT, PLOT_RIGHT);
    let y_range = (PLOT_BOTTOM, PLOT_TOP);
    let slots = spec.groups.len();
    let slot_width = if slots == 0 {
        0.0
    } else {
        (PLOT_RIGHT - PLOT_LEFT) / slots as f64
    };
    let bars_per_group = spec
        .groups
        .iter()
        .map(|group| group.bars.len())
        .max()
        .unwrap_or(1)
        .max(1);
    let bar_width = slot_width * GROUP_FILL / bars_per_group as f64;

    let groups: Vec<GroupGeom> = spec
        .groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let center = slot_center(index, slots, x_range);
            let first_x = center - slot_width * GROUP_FILL / 2.0;
            let bars = group
                .bars
                .iter()
                .enumerate()
                .map(|(slot, bar)| {
                    let y = project(bar.ratio, spec.y_domain, y_range);
                    BarGeom {
                        x: first_x + slot as f64 * bar_width,
                        y,
                        width: bar_width,
                        height: PLOT_BOTTOM - y,
                        color: bar.color,
                        opacity: if bar.emphasized {
                            palette::FULL_OPACITY
                        } else {
                            palette::DIM_OPACITY
                        },
                        year: bar.year,
                        tooltip: format!(
                            "{} {}: {}",
                            group.constituency,
                            bar.year,
                            format::format_pct(bar.ratio)
                        ),
                    }
                })
                .collect();
            let label_x = center;
            let label_y = PLOT_BOTTOM + 16.0;
            GroupGeom {
                constituency: group.constituency.clone(),
                label_x,
                label_y,
                label_transform: format!("rotate(-35 {label_x:.1} {label_y:.1})"),
                label_opacity: if group.emphasized {
                    palette::FULL_OPACITY
                } else {
                    palette::DIM_OPACITY
                },
                bars,
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
    let x_label_x = (PLOT_LEFT + PLOT_RIGHT) / 2.0;
    let x_label_y = VIEW_H - 10.0;
    let y_mid = (PLOT_TOP + PLOT_BOTTOM) / 2.0;

    rsx! {
        svg {
            class: "chart chart--bars",
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

            line {
                class: "chart__axis",
                x1: "{PLOT_LEFT}",
                y1: "{PLOT_BOTTOM}",
                x2: "{PLOT_RIGHT}",
                y2: "{PLOT_BOTTOM}",
            }

            for group in groups.iter() {
                for bar in group.bars.iter() {
                    rect {
                        key: "bar-{group.constituency}-{bar.year}",
                        class: "chart__bar",
                        x: "{bar.x}",
                        y: "{bar.y}",
                        width: "{bar.width}",
                        height: "{bar.height}",
                        fill: bar.color,
                        style: "opacity: {bar.opacity}",
                        onclick: {
                            let constituency = group.constituency.clone();
                            let year = bar.year;
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
                    key: "tick-{group.constituency}",
                    class: "chart__tick chart__tick--rotated",
                    x: "{group.label_x}",
                    y: "{group.label_y}",
                    transform: "{group.label_transform}",
                    style: "opacity: {group.label_opacity}",
                    "{group.constituency}"
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
