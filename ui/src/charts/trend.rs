//! Builders for the two trend charts: overall turnout over time and the
//! male/female split over time.

use api::{Gender, TurnoutDataset, Year};

use crate::core::aggregate::{self, YearRatio};
use crate::core::selection::Selection;

use super::{line_domain, palette};

/// One line of a trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: &'static str,
    pub color: &'static str,
    pub points: Vec<YearRatio>,
}

/// Everything a trend chart needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Tick positions, ascending. Every series point falls on one of these.
    pub x_years: Vec<Year>,
    pub series: Vec<LineSeries>,
    pub y_domain: (f64, f64),
    /// Dashed rule drawn at the selected year, if any.
    pub year_marker: Option<Year>,
    /// Whether points report clicks. The gender chart is display-only.
    pub clickable: bool,
}

/// Chart 1: elector-weighted overall turnout per year. A selected
/// constituency narrows the data; a selected year only draws the marker.
pub fn overall_trend(dataset: &TurnoutDataset, selection: &Selection) -> LineChartSpec {
    let constituency = selection.constituency.as_deref();
    let points = aggregate::overall_by_year(dataset, constituency);

    let title = match constituency {
        Some(name) => format!("Overall Voter Turnout Ratio ({name})"),
        None => "Overall Voter Turnout Ratio (All Constituencies)".to_string(),
    };

    LineChartSpec {
        title,
        x_label: "Year",
        y_label: "Turnout ratio (%)",
        x_years: dataset.years().to_vec(),
        y_domain: line_domain(points.iter().map(|p| p.ratio)),
        series: vec![LineSeries {
            label: "Overall",
            color: palette::OVERALL,
            points,
        }],
        year_marker: selection.year,
        clickable: true,
    }
}

/// Chart 2: one line per gender. Colours stay fixed per gender no matter
/// what is selected.
pub fn gender_trend(dataset: &TurnoutDataset, selection: &Selection) -> LineChartSpec {
    let constituency = selection.constituency.as_deref();
    let gendered = aggregate::gender_by_year(dataset, constituency);

    let title = match constituency {
        Some(name) => format!("Voter Turnout Ratio by Gender ({name})"),
        None => "Voter Turnout Ratio by Gender (All Constituencies)".to_string(),
    };

    let series: Vec<LineSeries> = Gender::BOTH
        .into_iter()
        .map(|gender| LineSeries {
            label: gender.label(),
            color: palette::gender_color(gender),
            points: gendered
                .iter()
                .filter(|p| p.gender == gender)
                .map(|p| YearRatio {
                    year: p.year,
                    ratio: p.ratio,
                })
                .collect(),
        })
        .collect();

    LineChartSpec {
        title,
        x_label: "Year",
        y_label: "Turnout ratio (%)",
        x_years: dataset.years().to_vec(),
        y_domain: line_domain(gendered.iter().map(|p| p.ratio)),
        series,
        year_marker: selection.year,
        clickable: false,
    }
}

#[cfg(test)]
mod tests {
    use api::TurnoutRecord;

    use super::*;

    fn rec(constituency: &str, year: Year, gender: Gender, electors: u64, votes: u64) -> TurnoutRecord {
        TurnoutRecord {
            year,
            constituency: constituency.to_string(),
            gender,
            electors,
            votes_polled: votes,
        }
    }

    fn dataset() -> TurnoutDataset {
        TurnoutDataset::new(vec![
            rec("Lucknow", Year::Y2014, Gender::Male, 1_000, 550),
            rec("Lucknow", Year::Y2014, Gender::Female, 900, 480),
            rec("Lucknow", Year::Y2019, Gender::Male, 1_050, 640),
            rec("Lucknow", Year::Y2019, Gender::Female, 980, 620),
            rec("Amethi", Year::Y2014, Gender::Male, 800, 420),
            rec("Amethi", Year::Y2014, Gender::Female, 760, 400),
            rec("Amethi", Year::Y2019, Gender::Male, 830, 470),
            rec("Amethi", Year::Y2019, Gender::Female, 810, 500),
        ])
        .unwrap()
    }

    #[test]
    fn overall_title_tracks_the_selected_constituency() {
        let ds = dataset();

        let all = overall_trend(&ds, &Selection::default());
        assert_eq!(all.title, "Overall Voter Turnout Ratio (All Constituencies)");
        assert!(all.clickable);

        let one = overall_trend(
            &ds,
            &Selection {
                year: None,
                constituency: Some("Amethi".to_string()),
            },
        );
        assert_eq!(one.title, "Overall Voter Turnout Ratio (Amethi)");
        // Narrowed to Amethi's records only.
        let amethi_2014 = (420.0 + 400.0) / (800.0 + 760.0) * 100.0;
        assert!((one.series[0].points[0].ratio - amethi_2014).abs() < 1e-9);
    }

    #[test]
    fn selected_year_becomes_a_marker_not_a_filter() {
        let ds = dataset();
        let spec = overall_trend(
            &ds,
            &Selection {
                year: Some(Year::Y2019),
                constituency: None,
            },
        );

        assert_eq!(spec.year_marker, Some(Year::Y2019));
        // Both years still plotted.
        assert_eq!(spec.series[0].points.len(), 2);
    }

    #[test]
    fn gender_series_keep_fixed_colours_and_order() {
        let ds = dataset();

        let plain = gender_trend(&ds, &Selection::default());
        assert_eq!(plain.series.len(), 2);
        assert_eq!(plain.series[0].label, "Male");
        assert_eq!(plain.series[0].color, palette::MALE);
        assert_eq!(plain.series[1].label, "Female");
        assert_eq!(plain.series[1].color, palette::FEMALE);
        assert!(!plain.clickable);

        let selected = gender_trend(
            &ds,
            &Selection {
                year: Some(Year::Y2014),
                constituency: Some("Lucknow".to_string()),
            },
        );
        assert_eq!(selected.series[0].color, palette::MALE);
        assert_eq!(selected.series[1].color, palette::FEMALE);
        assert_eq!(selected.title, "Voter Turnout Ratio by Gender (Lucknow)");
    }

    #[test]
    fn domains_cover_every_plotted_point() {
        let ds = dataset();
        let spec = gender_trend(&ds, &Selection::default());
        let (lo, hi) = spec.y_domain;
        for series in &spec.series {
            for point in &series.points {
                assert!(point.ratio >= lo && point.ratio <= hi);
            }
        }
    }
}
