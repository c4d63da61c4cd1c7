//! Parsers for NASA DONKI space-weather feeds.
//!
//! - [`donki`]: Classify raw FLR/CME/HSS records and normalize them into
//!   [`crate::core::domain::SolarEvent`] values
//!
//! # Example
//!
//! ```
//! use aurora_rust::parsing::donki::process_solar_data;
//! use serde_json::json;
//!
//! let activity = process_solar_data(&json!([
//!     {"activityID": "2024-05-10-CME-001", "cmeAnalyses": [{"speed": 950.0}]}
//! ]));
//! assert_eq!(activity.cme_events[0].speed, 950.0);
//! ```

pub mod donki;


pub use donki::{
    estimate_impact_times, normalize_value, process_solar_data, RawSolarRecord, SolarFeeds,
};
