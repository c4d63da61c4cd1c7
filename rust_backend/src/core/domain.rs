//! Domain models for solar events, activity snapshots and aurora forecasts.
//!
//! All types here are plain values. They serialize to the JSON shapes consumed by the
//! dashboard (`cmeEvents`, `visibleLatitudeRange`, ...) so the presentation layer can
//! take them as-is.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use qtty::Degrees;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ForecastError;

/// Sub-tag used when a record does not say where the event originated.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Sub-tag used for flares without a classification.
pub const UNKNOWN_CLASSIFICATION: &str = "Unknown";

/// Letter class of a solar flare (C < M < X).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlareClass {
    X,
    M,
    C,
    /// Any other letter, including garbled input
    Other,
}

impl FlareClass {
    /// Speed multiplier applied to the flare magnitude (km/s per unit of magnitude).
    pub fn speed_multiplier(self) -> f64 {
        match self {
            FlareClass::X => 1000.0,
            FlareClass::M => 100.0,
            FlareClass::C => 10.0,
            FlareClass::Other => 0.0,
        }
    }
}

/// Flare classification string exactly as supplied by the feed (e.g. `"X5.2"`).
///
/// The string is kept verbatim for display. The class letter and magnitude are
/// derived on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlareClassification(String);

impl FlareClassification {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Class letter, matched case-insensitively.
    pub fn class(&self) -> FlareClass {
        match self.0.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('X') => FlareClass::X,
            Some('M') => FlareClass::M,
            Some('C') => FlareClass::C,
            _ => FlareClass::Other,
        }
    }

    /// Numeric magnitude following the class letter, 0 when it cannot be read.
    ///
    /// Only the leading number is used, so `"X5.2/2B"` yields 5.2.
    pub fn magnitude(&self) -> f64 {
        let mut chars = self.0.chars();
        if chars.next().is_none() {
            return 0.0;
        }
        leading_number(chars.as_str()).unwrap_or(0.0)
    }

    /// Event speed derived from the classification: `magnitude * class multiplier`.
    ///
    /// ```
    /// use aurora_rust::core::domain::FlareClassification;
    ///
    /// assert_eq!(FlareClassification::new("X5").derived_speed(), 5000.0);
    /// assert_eq!(FlareClassification::new("m2").derived_speed(), 200.0);
    /// assert_eq!(FlareClassification::new("B7.1").derived_speed(), 0.0);
    /// ```
    pub fn derived_speed(&self) -> f64 {
        let speed = self.magnitude() * self.class().speed_multiplier();
        if speed.is_finite() {
            speed.max(0.0)
        } else {
            0.0
        }
    }

    /// Whether the classification text contains an upper-case `X`.
    pub fn mentions_x(&self) -> bool {
        self.0.contains('X')
    }

    /// Whether the classification text contains an upper-case `M`.
    pub fn mentions_m(&self) -> bool {
        self.0.contains('M')
    }
}

impl fmt::Display for FlareClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse the longest numeric prefix of `text` (after leading whitespace).
///
/// Accepts an optional sign, a decimal mantissa and an exponent such as `e1`. An
/// exponent marker without digits is not part of the number.
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mantissa_start = end;
    let mut seen_dot = false;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => {}
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !bytes[mantissa_start..end].iter().any(u8::is_ascii_digit) {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// Category of a solar event with its sub-classification.
///
/// Serialized as its display label (`"Solar Flare (X5)"`, `"CME (N10W20)"`,
/// `"High Speed Stream (CH 1234)"`), which is what the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub enum EventCategory {
    /// Solar flare; `None` when the feed gave no classification
    SolarFlare(Option<FlareClassification>),
    /// Coronal mass ejection. `kind` is the analysis type when the feed provides one.
    Cme { kind: String, location: String },
    /// High-speed solar wind stream
    HighSpeedStream { location: String },
}

impl EventCategory {
    /// CME with the default kind tag.
    pub fn cme(location: impl Into<String>) -> Self {
        EventCategory::Cme {
            kind: "CME".to_string(),
            location: location.into(),
        }
    }

    /// Rebuild a category from its display label.
    ///
    /// Used only at the serialization boundary; labels that match neither the
    /// flare nor the stream form are read as `"<kind> (<location>)"`.
    pub fn from_label(label: &str) -> Self {
        if let Some(inner) = strip_label(label, "Solar Flare") {
            let classification = (inner != UNKNOWN_CLASSIFICATION && !inner.is_empty())
                .then(|| FlareClassification::new(inner));
            return EventCategory::SolarFlare(classification);
        }
        if let Some(inner) = strip_label(label, "High Speed Stream") {
            return EventCategory::HighSpeedStream {
                location: inner.to_string(),
            };
        }
        match label.split_once(" (") {
            Some((kind, rest)) if rest.ends_with(')') => EventCategory::Cme {
                kind: kind.to_string(),
                location: rest[..rest.len() - 1].to_string(),
            },
            _ => EventCategory::Cme {
                kind: label.to_string(),
                location: UNKNOWN_LOCATION.to_string(),
            },
        }
    }

    /// Short name of the category without its sub-tag.
    pub fn name(&self) -> &str {
        match self {
            EventCategory::SolarFlare(_) => "Solar Flare",
            EventCategory::Cme { kind, .. } => kind,
            EventCategory::HighSpeedStream { .. } => "High Speed Stream",
        }
    }
}

fn strip_label<'a>(label: &'a str, category: &str) -> Option<&'a str> {
    label
        .strip_prefix(category)?
        .strip_prefix(" (")?
        .strip_suffix(')')
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::SolarFlare(Some(class)) => write!(f, "Solar Flare ({})", class),
            EventCategory::SolarFlare(None) => {
                write!(f, "Solar Flare ({})", UNKNOWN_CLASSIFICATION)
            }
            EventCategory::Cme { kind, location } => write!(f, "{} ({})", kind, location),
            EventCategory::HighSpeedStream { location } => {
                write!(f, "High Speed Stream ({})", location)
            }
        }
    }
}

impl Serialize for EventCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(EventCategory::from_label(&label))
    }
}

/// A solar event normalized from any of the DONKI feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarEvent {
    /// `None` when the feed carried no parseable time
    pub start_time: Option<DateTime<Utc>>,
    /// Speed in km/s, never negative
    pub speed: f64,
    #[serde(rename = "type")]
    pub category: EventCategory,
}

impl SolarEvent {
    /// Creates an event, clamping negative or non-finite speeds to 0.
    pub fn new(start_time: Option<DateTime<Utc>>, speed: f64, category: EventCategory) -> Self {
        let speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
        Self {
            start_time,
            speed,
            category,
        }
    }

    /// Display label of the event type, e.g. `"Solar Flare (X5)"`.
    pub fn label(&self) -> String {
        self.category.to_string()
    }
}

/// Expected arrival of an event at Earth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactTimeEstimate {
    pub arrival_time: DateTime<Utc>,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// Snapshot of solar activity produced by one ingestion cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarActivity {
    #[serde(default)]
    pub cme_events: Vec<SolarEvent>,
    #[serde(default)]
    pub estimated_impact_times: Vec<ImpactTimeEstimate>,
}

impl SolarActivity {
    pub fn new(cme_events: Vec<SolarEvent>, estimated_impact_times: Vec<ImpactTimeEstimate>) -> Self {
        Self {
            cme_events,
            estimated_impact_times,
        }
    }

    /// Snapshot with no events, used when the input is malformed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cme_events.is_empty() && self.estimated_impact_times.is_empty()
    }
}

/// Latitude band in which the aurora may be visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatitudeRange {
    pub min: Degrees,
    pub max: Degrees,
}

/// Visibility forecast for one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuroraForecast {
    /// Probability in [0, 1]
    pub probability: f64,
    pub visible_latitude_range: LatitudeRange,
}

/// Validated geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    pub latitude: Degrees,
    pub longitude: Degrees,
}

impl GeoLocation {
    /// Creates a location, rejecting coordinates outside [-90, 90] x [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ForecastError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ForecastError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ForecastError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        })
    }
}

/// A named place on the forecast watch-list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NamedLocation {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn geo(&self) -> Result<GeoLocation, ForecastError> {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

/// Forecast for a watch-list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationForecast {
    pub location: NamedLocation,
    pub forecast: AuroraForecast,
}

/// High-intensity moment in the historical record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakTime {
    pub time: DateTime<Utc>,
    /// Event speed divided by 1000
    pub intensity: f64,
}

/// Location ranked by historical viewing probability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewingLocation {
    pub location: String,
    pub probability: f64,
}

/// Meteorological season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];
}

/// Historical roll-up over a sequence of activity snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    /// `"YYYY-M"` (1-indexed month) to summed event speed
    pub monthly_activity: BTreeMap<String, f64>,
    pub best_viewing_locations: Vec<ViewingLocation>,
    /// Sorted by descending intensity
    pub peak_times: Vec<PeakTime>,
    pub seasonal_patterns: BTreeMap<Season, f64>,
}
