//! Turnout aggregation queries.
//!
//! Every figure on the dashboard comes from one of the four queries below.
//! Ratios are always derived by summing electors and votes over the group
//! first and dividing once at the end. Averaging per-row percentages would
//! let small constituencies skew the figure, so no query ever does that.

use api::{Gender, TurnoutDataset, TurnoutRecord, Year};

use super::selection::Selection;

/// One point on a turnout trend line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearRatio {
    pub year: Year,
    pub ratio: f64,
}

/// One gendered point on a trend line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenderYearRatio {
    pub gender: Gender,
    pub year: Year,
    pub ratio: f64,
}

/// Per-year turnout for a single constituency.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstituencySeries {
    pub constituency: String,
    pub points: Vec<YearRatio>,
}

/// Male and female turnout for one constituency in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct GenderSplitRow {
    pub constituency: String,
    pub year: Year,
    pub male: f64,
    pub female: f64,
}

/// Headline figures for the current selection. `None` means no data matched,
/// rendered as "N/A".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KpiSummary {
    pub overall: Option<f64>,
    pub male: Option<f64>,
    pub female: Option<f64>,
}

/// Turnout as a percentage. Zero electors degrade to 0.0 rather than NaN.
pub fn pct(votes: u128, electors: u128) -> f64 {
    if electors == 0 {
        0.0
    } else {
        votes as f64 / electors as f64 * 100.0
    }
}

/// Counts are summed in u128 so a group of u64-range records cannot overflow.
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    electors: u128,
    votes: u128,
}

impl Tally {
    fn add(&mut self, record: &TurnoutRecord) {
        self.electors += u128::from(record.electors);
        self.votes += u128::from(record.votes_polled);
    }

    fn ratio(self) -> f64 {
        pct(self.votes, self.electors)
    }
}

fn in_constituency(record: &TurnoutRecord, constituency: Option<&str>) -> bool {
    constituency.map_or(true, |name| record.constituency == name)
}

/// Elector-weighted turnout per year, optionally restricted to one
/// constituency. Years with no matching records are omitted.
pub fn overall_by_year(dataset: &TurnoutDataset, constituency: Option<&str>) -> Vec<YearRatio> {
    let mut out = Vec::with_capacity(dataset.years().len());
    for &year in dataset.years() {
        let mut tally = Tally::default();
        let mut seen = false;
        for record in dataset
            .records()
            .iter()
            .filter(|r| r.year == year && in_constituency(r, constituency))
        {
            tally.add(record);
            seen = true;
        }
        if seen {
            out.push(YearRatio {
                year,
                ratio: tally.ratio(),
            });
        }
    }
    out
}

/// Elector-weighted turnout per (gender, year). Points are gender-major:
/// all male years first, then all female years, each ascending.
pub fn gender_by_year(
    dataset: &TurnoutDataset,
    constituency: Option<&str>,
) -> Vec<GenderYearRatio> {
    let mut out = Vec::with_capacity(2 * dataset.years().len());
    for gender in Gender::BOTH {
        for &year in dataset.years() {
            let mut tally = Tally::default();
            let mut seen = false;
            for record in dataset.records().iter().filter(|r| {
                r.gender == gender && r.year == year && in_constituency(r, constituency)
            }) {
                tally.add(record);
                seen = true;
            }
            if seen {
                out.push(GenderYearRatio {
                    gender,
                    year,
                    ratio: tally.ratio(),
                });
            }
        }
    }
    out
}

/// Per-constituency trend series, in first-appearance order.
pub fn by_constituency_year(dataset: &TurnoutDataset) -> Vec<ConstituencySeries> {
    dataset
        .constituencies()
        .iter()
        .map(|name| ConstituencySeries {
            constituency: name.clone(),
            points: overall_by_year(dataset, Some(name)),
        })
        .collect()
}

/// Gender split per (constituency, year) cell, constituency-major in
/// first-appearance order with years ascending. Cells absent from the data
/// are omitted.
pub fn by_constituency_year_gender(dataset: &TurnoutDataset) -> Vec<GenderSplitRow> {
    let mut out = Vec::new();
    for name in dataset.constituencies() {
        for &year in dataset.years() {
            let mut male = Tally::default();
            let mut female = Tally::default();
            let mut seen = false;
            for record in dataset
                .records()
                .iter()
                .filter(|r| r.year == year && r.constituency == *name)
            {
                match record.gender {
                    Gender::Male => male.add(record),
                    Gender::Female => female.add(record),
                }
                seen = true;
            }
            if seen {
                out.push(GenderSplitRow {
                    constituency: name.clone(),
                    year,
                    male: male.ratio(),
                    female: female.ratio(),
                });
            }
        }
    }
    out
}

/// Headline cards for the current selection. All three figures share the
/// record subset, so the overall figure is always the elector-weighted
/// combination of the gendered ones.
pub fn kpi_summary(dataset: &TurnoutDataset, selection: &Selection) -> KpiSummary {
    let mut overall = Tally::default();
    let mut male = Tally::default();
    let mut female = Tally::default();
    let mut seen = false;

    for record in dataset.records().iter().filter(|r| selection.admits(r)) {
        overall.add(record);
        match record.gender {
            Gender::Male => male.add(record),
            Gender::Female => female.add(record),
        }
        seen = true;
    }

    if !seen {
        return KpiSummary::default();
    }

    KpiSummary {
        overall: Some(overall.ratio()),
        male: Some(male.ratio()),
        female: Some(female.ratio()),
    }
}
