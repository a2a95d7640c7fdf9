//! Formatting helpers for presenting turnout figures.

pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_tick(value: f64) -> String {
    format!("{value:.0}")
}
