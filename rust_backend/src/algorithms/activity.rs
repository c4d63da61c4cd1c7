//! Geomagnetic activity estimation from normalized solar events.
//!
//! The estimate is a heuristic proxy for the Kp index: each event contributes
//! `speed * 0.001`, boosted for strong flares, and the strongest single event wins.

use std::cmp::Ordering;

use crate::core::domain::{EventCategory, SolarEvent};

/// Number of events considered when estimating activity.
pub const SIGNIFICANT_EVENT_COUNT: usize = 3;

/// Conversion from event speed (km/s) to activity units.
pub const SPEED_IMPACT_FACTOR: f64 = 0.001;

const X_CLASS_BOOST: f64 = 2.0;
const M_CLASS_BOOST: f64 = 1.5;

/// Return the `k` fastest events, fastest first.
///
/// The sort is stable, so events with equal speed keep their input order.
pub fn most_significant_events(events: &[SolarEvent], k: usize) -> Vec<SolarEvent> {
    let mut ranked = events.to_vec();
    ranked.sort_by(|a, b| b.speed.partial_cmp(&a.speed).unwrap_or(Ordering::Equal));
    ranked.truncate(k);
    ranked
}

/// Activity contribution of a single event.
///
/// Flares whose classification text contains `X` are doubled and those containing
/// `M` are multiplied by 1.5. Both checks apply independently, so a label holding
/// both letters is boosted by 3.
pub fn event_activity(event: &SolarEvent) -> f64 {
    let mut activity = event.speed * SPEED_IMPACT_FACTOR;

    if let EventCategory::SolarFlare(Some(classification)) = &event.category {
        if classification.mentions_x() {
            activity *= X_CLASS_BOOST;
        }
        if classification.mentions_m() {
            activity *= M_CLASS_BOOST;
        }
    }

    activity
}

/// Estimate the Kp-index proxy from a set of events.
///
/// Returns the maximum per-event activity, or 0 for no events.
pub fn estimate_activity(events: &[SolarEvent]) -> f64 {
    events.iter().map(event_activity).fold(0.0, f64::max)
}
