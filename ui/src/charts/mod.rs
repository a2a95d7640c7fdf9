//! Declarative chart descriptions.
//!
//! The builders here are pure: they take the dataset and the current
//! selection and return plain structs saying what to draw. The SVG components
//! under `components` render those structs and report clicks back as
//! [`ClickTarget`](crate::core::selection::ClickTarget) events.

pub mod palette;

mod bars;
pub use bars::{
    constituency_bars, gender_bars, Bar, BarChartSpec, BarGroup, FacetedBarSpec, GenderGroup,
    LegendEntry, YearPanel,
};

mod trend;
pub use trend::{gender_trend, overall_trend, LineChartSpec, LineSeries};

/// Y-axis domain for trend lines: the data range with a little padding,
/// never dipping below zero. Falls back to the full percentage scale when
/// there are no points.
pub(crate) fn line_domain<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for value in values {
        lo = lo.min(value);
        hi = hi.max(value);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 100.0);
    }
    let pad = ((hi - lo) * 0.15).max(2.0);
    ((lo - pad).max(0.0), hi + pad)
}

/// Y-axis domain for bar charts: zero-based with headroom for point labels.
pub(crate) fn bar_domain<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let mut hi = 0.0_f64;
    for value in values {
        hi = hi.max(value);
    }
    if hi <= 0.0 {
        return (0.0, 100.0);
    }
    (0.0, hi + (hi * 0.1).max(2.0))
}
