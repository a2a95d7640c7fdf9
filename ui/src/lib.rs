//! Shared UI crate for the turnout dashboard. Aggregation, selection state
//! and the chart components all live here so every frontend renders the same
//! figures.

pub mod charts;
pub mod components;
pub mod core;
pub mod views;
