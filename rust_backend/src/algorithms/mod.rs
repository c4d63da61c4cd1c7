//! Space-weather algorithms.
//!
//! # Components
//!
//! - [`activity`]: Selection of the most significant events and the Kp-index proxy
//!
//! # Example
//!
//! ```
//! use aurora_rust::algorithms::{estimate_activity, most_significant_events};
//! use aurora_rust::core::domain::{EventCategory, SolarEvent};
//!
//! let events = vec![
//!     SolarEvent::new(None, 800.0, EventCategory::cme("N10W20")),
//!     SolarEvent::new(None, 1200.0, EventCategory::cme("S05E11")),
//! ];
//! let top = most_significant_events(&events, 3);
//! assert!((estimate_activity(&top) - 1.2).abs() < 1e-12);
//! ```

pub mod activity;

pub use activity::{
    estimate_activity, event_activity, most_significant_events, SIGNIFICANT_EVENT_COUNT,
    SPEED_IMPACT_FACTOR,
};
