//! SVG renderer for [`LineChartSpec`].

use dioxus::prelude::*;

use api::Year;

use crate::charts::{palette, LineChartSpec};
use crate::core::format;
use crate::core::selection::ClickTarget;

use super::scale::{project, slot_center, ticks};

const VIEW_W: f64 = 640.0;
const VIEW_H: f64 = 400.0;
const PLOT_LEFT: f64 = 56.0;
const PLOT_RIGHT: f64 = VIEW_W - 20.0;
const PLOT_TOP: f64 = 44.0;
const PLOT_BOTTOM: f64 = VIEW_H - 52.0;

struct PointGeom {
    x: f64,
    y: f64,
    label_y: f64,
    year: Year,
    label: String,
}

struct SeriesGeom {
    color: &'static str,
    path: String,
    points: Vec<PointGeom>,
}

struct LegendGeom {
    swatch_x: f64,
    label_x: f64,
    label: &'static str,
    color: &'static str,
}

struct Gridline {
    y: f64,
    text_y: f64,
    label: String,
}

#[component]
pub fn LineChart(spec: LineChartSpec, on_click: EventHandler<ClickTarget>) -> Element {
    let x_range = (PLOT_LEFT, PLOT_RIGHT);
    let y_range = (PLOT_BOTTOM, PLOT_TOP);
    let slots = spec.x_years.len();

    let year_x = |year: Year| {
        spec.x_years
            .iter()
            .position(|&y| y == year)
            .map(|index| slot_center(index, slots, x_range))
    };

    let series: Vec<SeriesGeom> = spec
        .series
        .iter()
        .map(|line| {
            let points: Vec<PointGeom> = line
                .points
                .iter()
                .filter_map(|point| {
                    year_x(point.year).map(|x| {
                        let y = project(point.ratio, spec.y_domain, y_range);
                        PointGeom {
                            x,
                            y,
                            label_y: y - 12.0,
                            year: point.year,
                            label: format::format_pct(point.ratio),
                        }
                    })
                })
                .collect();
            let path = points
                .iter()
                .map(|p| format!("{:.1},{:.1}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            SeriesGeom {
                color: line.color,
                path,
                points,
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

    let x_ticks: Vec<(f64, String)> = spec
        .x_years
        .iter()
        .enumerate()
        .map(|(index, year)| (slot_center(index, slots, x_range), year.to_string()))
        .collect();

    let legend: Vec<LegendGeom> = if spec.series.len() > 1 {
        spec.series
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let swatch_x = PLOT_RIGHT - 75.0 * (spec.series.len() - index) as f64;
                LegendGeom {
                    swatch_x,
                    label_x: swatch_x + 16.0,
                    label: line.label,
                    color: line.color,
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let marker_x = spec.year_marker.and_then(year_x);
    let clickable = spec.clickable;
    let y_tick_x = PLOT_LEFT - 8.0;
    let x_tick_y = PLOT_BOTTOM + 20.0;
    let x_label_x = (PLOT_LEFT + PLOT_RIGHT) / 2.0;
    let x_label_y = VIEW_H - 10.0;
    let y_mid = (PLOT_TOP + PLOT_BOTTOM) / 2.0;

    rsx! {
        svg {
            class: "chart chart--line",
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

            for (x, label) in x_ticks {
                text { class: "chart__tick chart__tick--x", x: "{x}", y: "{x_tick_y}", "{label}" }
            }

            if let Some(mx) = marker_x {
                line {
                    class: "chart__marker",
                    stroke: palette::YEAR_MARKER,
                    x1: "{mx}",
                    y1: "{PLOT_TOP}",
                    x2: "{mx}",
                    y2: "{PLOT_BOTTOM}",
                }
            }

            for (index, line) in series.iter().enumerate() {
                polyline {
                    key: "line-{index}",
                    class: "chart__line",
                    points: "{line.path}",
                    stroke: line.color,
                }
            }

            for (index, line) in series.iter().enumerate() {
                for point in line.points.iter() {
                    circle {
                        key: "pt-{index}-{point.year}",
                        class: if clickable { "chart__point chart__point--clickable" } else { "chart__point" },
                        cx: "{point.x}",
                        cy: "{point.y}",
                        r: "5",
                        fill: line.color,
                        onclick: {
                            let year = point.year;
                            move |_| {
                                if clickable {
                                    on_click.call(ClickTarget::YearPoint(year));
                                }
                            }
                        },
                    }
                    text {
                        key: "lbl-{index}-{point.year}",
                        class: "chart__value",
                        x: "{point.x}",
                        y: "{point.label_y}",
                        "{point.label}"
                    }
                }
            }

            for entry in legend {
                rect {
                    key: "lg-swatch-{entry.label}",
                    class: "chart__legend-swatch",
                    x: "{entry.swatch_x}",
                    y: "14",
                    width: "12",
                    height: "12",
                    fill: entry.color,
                }
                text {
                    key: "lg-label-{entry.label}",
                    class: "chart__legend-label",
                    x: "{entry.label_x}",
                    y: "24",
                    "{entry.label}"
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
