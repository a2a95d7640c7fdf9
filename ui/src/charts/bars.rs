//! Builders for the two constituency bar charts: grouped-by-year bars and the
//! gender split faceted per year.
//!
//! Selections never remove bars from these charts. A selected year or
//! constituency dims everything else instead, so the reader keeps the full
//! comparison while the selected slice stands out.

use std::cmp::Ordering;

use api::{TurnoutDataset, Year};

use crate::core::aggregate;
use crate::core::selection::Selection;

use super::{bar_domain, palette};

/// Legend swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

/// One bar: a year within a constituency group.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub year: Year,
    pub ratio: f64,
    pub color: &'static str,
    pub emphasized: bool,
}

/// All bars for one constituency.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub constituency: String,
    pub emphasized: bool,
    pub bars: Vec<Bar>,
}

/// Chart 3: grouped bars, one group per constituency.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub groups: Vec<BarGroup>,
    pub legend: Vec<LegendEntry>,
    pub y_domain: (f64, f64),
}

/// Male/female bars for one constituency within a year panel.
#[derive(Debug, Clone, PartialEq)]
pub struct GenderGroup {
    pub constituency: String,
    pub emphasized: bool,
    pub male: f64,
    pub female: f64,
}

/// One facet of chart 4.
#[derive(Debug, Clone, PartialEq)]
pub struct YearPanel {
    pub year: Year,
    pub groups: Vec<GenderGroup>,
}

/// Chart 4: gender split faceted by year, sharing one y-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetedBarSpec {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub panels: Vec<YearPanel>,
    pub legend: Vec<LegendEntry>,
    pub y_domain: (f64, f64),
}

fn emphasized(selection: &Selection, constituency: &str, year: Year) -> bool {
    selection.year.map_or(true, |y| y == year)
        && selection
            .constituency
            .as_deref()
            .map_or(true, |name| name == constituency)
}

/// Stable descending sort by precomputed total, so equal totals keep their
/// first-appearance order.
fn sort_descending<T>(entries: &mut [(f64, T)]) {
    entries.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
}

/// Chart 3: turnout per constituency and year. Groups are ordered by their
/// summed ratio across years, largest first.
pub fn constituency_bars(dataset: &TurnoutDataset, selection: &Selection) -> BarChartSpec {
    let mut ordered: Vec<(f64, aggregate::ConstituencySeries)> =
        aggregate::by_constituency_year(dataset)
            .into_iter()
            .map(|series| {
                let total = series.points.iter().map(|p| p.ratio).sum();
                (total, series)
            })
            .collect();
    sort_descending(&mut ordered);

    let groups: Vec<BarGroup> = ordered
        .into_iter()
        .map(|(_, series)| BarGroup {
            emphasized: selection
                .constituency
                .as_deref()
                .map_or(true, |name| name == series.constituency),
            bars: series
                .points
                .iter()
                .map(|point| Bar {
                    year: point.year,
                    ratio: point.ratio,
                    color: palette::year_color(point.year),
                    emphasized: emphasized(selection, &series.constituency, point.year),
                })
                .collect(),
            constituency: series.constituency,
        })
        .collect();

    let y_domain = bar_domain(
        groups
            .iter()
            .flat_map(|g| g.bars.iter().map(|b| b.ratio)),
    );

    BarChartSpec {
        title: "Voter Turnout Ratio across Constituencies and Time".to_string(),
        x_label: "Constituency",
        y_label: "Turnout ratio (%)",
        legend: dataset
            .years()
            .iter()
            .map(|&year| LegendEntry {
                label: year.to_string(),
                color: palette::year_color(year),
            })
            .collect(),
        groups,
        y_domain,
    }
}

/// Chart 4: the gender split per constituency, one panel per year. Panels
/// are ordered ascending; groups inside each panel are ordered by that
/// year's summed ratio, so panel orders differ when the data says so.
pub fn gender_bars(dataset: &TurnoutDataset, selection: &Selection) -> FacetedBarSpec {
    let rows = aggregate::by_constituency_year_gender(dataset);

    let panels: Vec<YearPanel> = dataset
        .years()
        .iter()
        .map(|&year| {
            let mut groups: Vec<(f64, GenderGroup)> = rows
                .iter()
                .filter(|row| row.year == year)
                .map(|row| {
                    (
                        row.male + row.female,
                        GenderGroup {
                            constituency: row.constituency.clone(),
                            emphasized: emphasized(selection, &row.constituency, year),
                            male: row.male,
                            female: row.female,
                        },
                    )
                })
                .collect();
            sort_descending(&mut groups);

            YearPanel {
                year,
                groups: groups.into_iter().map(|(_, group)| group).collect(),
            }
        })
        .collect();

    let y_domain = bar_domain(rows.iter().flat_map(|row| [row.male, row.female]));

    FacetedBarSpec {
        title: "Voter Turnout Ratio across Constituencies and Genders".to_string(),
        x_label: "Constituency",
        y_label: "Turnout ratio (%)",
        legend: vec![
            LegendEntry {
                label: "Male".to_string(),
                color: palette::MALE,
            },
            LegendEntry {
                label: "Female".to_string(),
                color: palette::FEMALE,
            },
        ],
        panels,
        y_domain,
    }
}
