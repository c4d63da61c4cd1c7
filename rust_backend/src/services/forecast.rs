//! Aurora visibility forecasting.
//!
//! Converts the activity estimate of a snapshot into a visibility probability for a
//! location and the latitude band where the aurora may be seen. Probability grows
//! with distance poleward of 55° and with activity; the band widens southward as
//! activity increases.
//!
//! Everything here is a pure function of its inputs, so forecasts for any number of
//! locations can be computed in parallel without coordination.

use qtty::Degrees;

use crate::algorithms::{estimate_activity, most_significant_events, SIGNIFICANT_EVENT_COUNT};
use crate::core::domain::{
    AuroraForecast, GeoLocation, LatitudeRange, LocationForecast, NamedLocation, SolarActivity,
};
use crate::error::ForecastError;

/// Latitude below which the aurora is never forecast (absolute degrees).
pub const MIN_AURORA_LATITUDE: f64 = 55.0;

/// Span from [`MIN_AURORA_LATITUDE`] to the pole.
const LATITUDE_SPAN: f64 = 35.0;

/// Upper end of the Kp scale.
const KP_SCALE_MAX: f64 = 9.0;

/// Southern edge of the visible band at zero activity.
const QUIET_BAND_EDGE: f64 = 65.0;

/// Southward shift of the band edge per unit of activity.
const BAND_SHIFT_PER_KP: f64 = 1.5;

/// The band edge never extends south of this latitude.
const BAND_EDGE_FLOOR: f64 = 50.0;

/// Band latitude reported when no location has a strong forecast.
pub const DEFAULT_BAND_LATITUDE: f64 = 65.0;

/// Probability above which a location counts toward the aurora band.
const BAND_PROBABILITY_THRESHOLD: f64 = 0.5;

/// Visibility probability for an activity estimate at a latitude.
///
/// Exactly 0 when `|latitude| < 55`. Otherwise the product of the latitude factor
/// `(|lat| - 55) / 35` and the activity factor `activity / 9`, capped at 1.
///
/// # Example
/// ```
/// use aurora_rust::services::forecast::calculate_probability;
///
/// assert_eq!(calculate_probability(9.0, 50.0), 0.0);
/// assert_eq!(calculate_probability(9.0, 90.0), 1.0);
/// ```
pub fn calculate_probability(activity: f64, latitude: f64) -> f64 {
    let abs_latitude = latitude.abs();
    if abs_latitude < MIN_AURORA_LATITUDE {
        return 0.0;
    }

    let latitude_factor = (abs_latitude - MIN_AURORA_LATITUDE) / LATITUDE_SPAN;
    let activity_factor = activity / KP_SCALE_MAX;

    // Scaled to percent before capping so boundary rounding stays identical to the
    // dashboard's percentage computation.
    (latitude_factor * activity_factor * 100.0).min(100.0) / 100.0
}

/// Latitude band in which the aurora may be visible for an activity estimate.
///
/// `min = max(65 - 1.5 * activity, 50)`, `max = 90`.
pub fn visible_latitude_range(activity: f64) -> LatitudeRange {
    let min = (QUIET_BAND_EDGE - activity * BAND_SHIFT_PER_KP).max(BAND_EDGE_FLOOR);
    LatitudeRange {
        min: Degrees::new(min),
        max: Degrees::new(90.0),
    }
}

/// Forecast for a latitude from an already computed activity estimate.
pub fn forecast_from_activity(activity: f64, latitude: f64) -> AuroraForecast {
    AuroraForecast {
        probability: calculate_probability(activity, latitude),
        visible_latitude_range: visible_latitude_range(activity),
    }
}

/// Activity estimate of a snapshot, from its three fastest events.
pub fn snapshot_activity(activity: &SolarActivity) -> f64 {
    let significant = most_significant_events(&activity.cme_events, SIGNIFICANT_EVENT_COUNT);
    estimate_activity(&significant)
}

/// Aurora forecast for one location.
///
/// Longitude does not influence the result.
pub fn calculate_aurora_probability(
    activity: &SolarActivity,
    location: &GeoLocation,
) -> AuroraForecast {
    forecast_from_activity(snapshot_activity(activity), location.latitude.value())
}

/// Forecasts for a watch-list of named locations, in input order.
///
/// # Errors
/// [`ForecastError`] for the first location with out-of-range coordinates.
pub fn forecast_locations(
    activity: &SolarActivity,
    locations: &[NamedLocation],
) -> Result<Vec<LocationForecast>, ForecastError> {
    let estimate = snapshot_activity(activity);

    locations
        .iter()
        .map(|location| {
            let geo = location.geo()?;
            Ok(LocationForecast {
                location: location.clone(),
                forecast: forecast_from_activity(estimate, geo.latitude.value()),
            })
        })
        .collect()
}

/// Mean latitude of the locations with probability above 0.5.
///
/// Falls back to [`DEFAULT_BAND_LATITUDE`] when no location qualifies.
pub fn aurora_band_latitude(forecasts: &[LocationForecast]) -> f64 {
    let strong: Vec<f64> = forecasts
        .iter()
        .filter(|f| f.forecast.probability > BAND_PROBABILITY_THRESHOLD)
        .map(|f| f.location.latitude)
        .collect();

    if strong.is_empty() {
        return DEFAULT_BAND_LATITUDE;
    }
    strong.iter().sum::<f64>() / strong.len() as f64
}
