//! Service layer for forecasting and reporting.
//!
//! Services combine normalized snapshots with the activity algorithms to produce the
//! values handed to the presentation layer.

pub mod forecast;
pub mod statistics;
pub mod timeline;

#[cfg(test)]
mod forecast_tests;

pub use forecast::{
    aurora_band_latitude, calculate_aurora_probability, calculate_probability,
    forecast_locations, visible_latitude_range,
};
pub use statistics::analyze_aurora_activity;
pub use timeline::build_event_series;
