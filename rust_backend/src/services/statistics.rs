//! Historical roll-ups over sequences of activity snapshots.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::core::domain::{ActivityStats, PeakTime, Season, SolarActivity, ViewingLocation};
use crate::time::month_key;

/// Events faster than this (km/s) are reported as peaks.
pub const PEAK_SPEED_THRESHOLD: f64 = 800.0;

/// Build the activity statistics for a history of snapshots.
pub fn analyze_aurora_activity(history: &[SolarActivity]) -> ActivityStats {
    ActivityStats {
        monthly_activity: calculate_monthly_activity(history),
        best_viewing_locations: find_best_locations(history),
        peak_times: find_peak_times(history),
        seasonal_patterns: analyze_seasonal_patterns(history),
    }
}

/// Sum of event speeds per `"YYYY-M"` month (UTC, 1-indexed month).
///
/// Events without a start time cannot be bucketed and are skipped.
pub fn calculate_monthly_activity(history: &[SolarActivity]) -> BTreeMap<String, f64> {
    let mut monthly = BTreeMap::new();

    for event in history.iter().flat_map(|snapshot| &snapshot.cme_events) {
        match &event.start_time {
            Some(start) => *monthly.entry(month_key(start)).or_insert(0.0) += event.speed,
            None => log::debug!("Skipping undated event {} in monthly roll-up", event.label()),
        }
    }

    monthly
}

/// Extension point: no ranking is computed yet, so the list is always empty.
pub fn find_best_locations(_history: &[SolarActivity]) -> Vec<ViewingLocation> {
    Vec::new()
}

/// Dated events faster than 800 km/s, as `speed / 1000` intensity, strongest first.
///
/// Equal intensities keep their input order.
pub fn find_peak_times(history: &[SolarActivity]) -> Vec<PeakTime> {
    let mut peaks: Vec<PeakTime> = history
        .iter()
        .flat_map(|snapshot| &snapshot.cme_events)
        .filter(|event| event.speed > PEAK_SPEED_THRESHOLD)
        .filter_map(|event| {
            event.start_time.map(|time| PeakTime {
                time,
                intensity: event.speed / 1000.0,
            })
        })
        .collect();

    peaks.sort_by(|a, b| {
        b.intensity
            .partial_cmp(&a.intensity)
            .unwrap_or(Ordering::Equal)
    });
    peaks
}

/// Extension point: every season is present with a zero accumulator.
pub fn analyze_seasonal_patterns(_history: &[SolarActivity]) -> BTreeMap<Season, f64> {
    Season::ALL.iter().map(|season| (*season, 0.0)).collect()
}
