mod scale;

mod line_chart;
pub use line_chart::LineChart;

mod bar_chart;
pub use bar_chart::GroupedBarChart;

mod faceted_bar_chart;
pub use faceted_bar_chart::FacetedBarChart;

mod filter_bar;
pub use filter_bar::FilterBar;

mod kpi_row;
pub use kpi_row::KpiRow;
