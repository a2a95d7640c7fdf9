//! Fixed colour assignments. Charts must never reassign colours when the
//! selection changes, so everything is keyed on the domain value itself.

use api::{Gender, Year};

/// Orange ramp, light to dark by election year.
pub const YEAR_COLORS: [&str; 3] = ["#FDBE85", "#FD8D3C", "#E6550D"];

/// The overall trend line and KPI accent.
pub const OVERALL: &str = "#E6550D";

/// Dashed marker rule drawn at the selected year.
pub const YEAR_MARKER: &str = "red";

pub const MALE: &str = "blue";
pub const FEMALE: &str = "pink";

/// Female KPI card accent, a darker shade than the chart series.
pub const FEMALE_KPI: &str = "deeppink";

/// Opacity for de-emphasised bars when a selection is active.
pub const DIM_OPACITY: f64 = 0.3;
pub const FULL_OPACITY: f64 = 1.0;

pub fn year_color(year: Year) -> &'static str {
    match year {
        Year::Y2014 => YEAR_COLORS[0],
        Year::Y2019 => YEAR_COLORS[1],
        Year::Y2024 => YEAR_COLORS[2],
    }
}

pub fn gender_color(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => MALE,
        Gender::Female => FEMALE,
    }
}
