//! Normalization of NASA DONKI records into unified solar events.
//!
//! DONKI publishes separate feeds for solar flares (FLR), coronal mass ejections (CME)
//! and high-speed streams (HSS), each with its own record layout. This module
//! classifies every raw record into one of those shapes, converts it into a
//! [`SolarEvent`], and extracts expected-arrival estimates.
//!
//! Upstream feeds are unreliable, so missing or mistyped fields fall back to
//! documented defaults instead of failing:
//! - stream speed defaults to 400 km/s
//! - impact confidence defaults to 0.5
//! - anything that is not a JSON object is treated as an empty CME record

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::domain::{
    EventCategory, FlareClassification, ImpactTimeEstimate, SolarActivity, SolarEvent,
    UNKNOWN_LOCATION,
};
use crate::error::IngestError;
use crate::time::{parse_donki_timestamp, parse_json_timestamp};

/// Value of the `type` field marking a record from the HSS feed.
pub const HSS_TAG: &str = "HSS";

/// Speed assumed for a high-speed stream that reports none (km/s).
pub const DEFAULT_STREAM_SPEED: f64 = 400.0;

/// Confidence assumed for an arrival estimate that reports none.
pub const DEFAULT_IMPACT_CONFIDENCE: f64 = 0.5;

/// Accepts a string or a number; empty strings and other JSON types become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a number or a numeric string; zero, NaN and other JSON types become `None`.
fn lenient_speed<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(nonzero_number))
}

fn nonzero_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (number != 0.0 && !number.is_nan()).then_some(number)
}

/// JavaScript-style truthiness, which is how DONKI consumers test optional fields.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Raw solar flare record from the FLR feed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlareRecord {
    #[serde(rename = "flrID", default, deserialize_with = "lenient_string")]
    pub flr_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub begin_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub peak_time: Option<String>,
}

/// Raw high-speed stream record from the HSS feed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHighSpeedStreamRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_speed")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_speed")]
    pub speed_value: Option<f64>,
}

/// One entry of a CME record's `cmeAnalyses` list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCmeAnalysis {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_speed")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_speed")]
    pub velocity: Option<f64>,
}

/// Raw CME record, also the fallback for unclassified records
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCmeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub activity_start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_speed")]
    pub velocity_value: Option<f64>,
    /// Kept raw so a malformed list cannot discard the top-level fields
    #[serde(default)]
    pub cme_analyses: Option<Value>,
}

impl RawCmeRecord {
    /// First entry of `cmeAnalyses`, when it is a JSON object.
    pub fn first_analysis(&self) -> Option<RawCmeAnalysis> {
        self.cme_analyses
            .as_ref()
            .and_then(Value::as_array)
            .and_then(|list| list.first())
            .filter(|entry| entry.is_object())
            .map(|entry| decode_or_default(entry, "CME analysis"))
    }
}

/// A raw DONKI record classified by shape
#[derive(Debug, Clone)]
pub enum RawSolarRecord {
    Flare(RawFlareRecord),
    HighSpeedStream(RawHighSpeedStreamRecord),
    Cme(RawCmeRecord),
}

impl RawSolarRecord {
    /// Classify a JSON record by its discriminating fields.
    ///
    /// Priority: a truthy `flrID` makes a flare, `"type": "HSS"` makes a high-speed
    /// stream, and every other object is read as a CME.
    ///
    /// # Errors
    /// [`IngestError::UnrecognizedShape`] when the record is not a JSON object.
    pub fn classify(value: &Value) -> Result<Self, IngestError> {
        let object = value.as_object().ok_or(IngestError::UnrecognizedShape {
            found: json_kind(value),
        })?;

        if object.get("flrID").is_some_and(is_truthy) {
            return Ok(RawSolarRecord::Flare(decode_or_default(value, "flare")));
        }
        if object.get("type").and_then(Value::as_str) == Some(HSS_TAG) {
            return Ok(RawSolarRecord::HighSpeedStream(decode_or_default(
                value,
                "high-speed stream",
            )));
        }
        Ok(RawSolarRecord::Cme(decode_or_default(value, "CME")))
    }

    /// Convert the record into a unified event.
    pub fn normalize(&self) -> SolarEvent {
        match self {
            RawSolarRecord::Flare(flare) => normalize_flare(flare),
            RawSolarRecord::HighSpeedStream(stream) => normalize_stream(stream),
            RawSolarRecord::Cme(cme) => normalize_cme(cme),
        }
    }
}

/// Decode a record shape, falling back to the empty shape when a field has an
/// unexpected JSON type.
fn decode_or_default<T>(value: &Value, shape: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_path_to_error::deserialize(value) {
        Ok(record) => record,
        Err(err) => {
            log::warn!(
                "Malformed {} record at '{}': {}; using defaults",
                shape,
                err.path(),
                err.inner()
            );
            T::default()
        }
    }
}

fn normalize_flare(flare: &RawFlareRecord) -> SolarEvent {
    let classification = flare.class_type.as_deref().map(FlareClassification::new);
    let speed = classification
        .as_ref()
        .map_or(0.0, FlareClassification::derived_speed);
    let start_time = flare
        .begin_time
        .as_deref()
        .or(flare.peak_time.as_deref())
        .and_then(parse_donki_timestamp);

    SolarEvent::new(start_time, speed, EventCategory::SolarFlare(classification))
}

fn normalize_stream(stream: &RawHighSpeedStreamRecord) -> SolarEvent {
    let speed = stream
        .speed_value
        .or(stream.speed)
        .unwrap_or(DEFAULT_STREAM_SPEED);
    let location = stream
        .source_location
        .clone()
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    SolarEvent::new(
        stream.event_time.as_deref().and_then(parse_donki_timestamp),
        speed,
        EventCategory::HighSpeedStream { location },
    )
}

fn normalize_cme(cme: &RawCmeRecord) -> SolarEvent {
    let first = cme.first_analysis();
    let analysis = first.as_ref();

    let speed = analysis
        .and_then(|a| a.speed.or(a.velocity))
        .or(cme.velocity_value)
        .unwrap_or(0.0);
    let kind = analysis
        .and_then(|a| a.kind.clone())
        .unwrap_or_else(|| "CME".to_string());
    let location = analysis
        .and_then(|a| a.source_location.clone())
        .or_else(|| cme.source_location.clone())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());
    let start_time = cme
        .activity_start_time
        .as_deref()
        .or(cme.start_time.as_deref())
        .and_then(parse_donki_timestamp);

    SolarEvent::new(start_time, speed, EventCategory::Cme { kind, location })
}

/// Normalize any JSON record; records of unknown shape become an empty CME.
///
/// # Example
/// ```
/// use aurora_rust::parsing::donki::normalize_value;
/// use serde_json::json;
///
/// let event = normalize_value(&json!({"flrID": "F1", "classType": "X5"}));
/// assert_eq!(event.speed, 5000.0);
/// assert_eq!(event.label(), "Solar Flare (X5)");
/// ```
pub fn normalize_value(value: &Value) -> SolarEvent {
    match RawSolarRecord::classify(value) {
        Ok(record) => record.normalize(),
        Err(err) => {
            log::warn!("{}; treating record as an unclassified CME", err);
            RawSolarRecord::Cme(RawCmeRecord::default()).normalize()
        }
    }
}

/// Mark a record from the HSS feed so it classifies as a high-speed stream.
pub fn tag_high_speed_stream(mut record: Value) -> Value {
    if let Some(object) = record.as_object_mut() {
        object.insert("type".to_string(), Value::String(HSS_TAG.to_string()));
    }
    record
}

/// Extract arrival estimates from records carrying `expectedTimeOfArrival`.
///
/// Records without the field, or with an arrival time that cannot be parsed, are
/// dropped. Input order is preserved.
pub fn estimate_impact_times(records: &[Value]) -> Vec<ImpactTimeEstimate> {
    records
        .iter()
        .filter_map(|record| {
            let arrival = record
                .get("expectedTimeOfArrival")
                .filter(|v| is_truthy(v))?;
            let Some(arrival_time) = parse_json_timestamp(arrival) else {
                log::debug!("Dropping impact estimate with unreadable arrival {}", arrival);
                return None;
            };
            let confidence = record
                .get("confidence")
                .and_then(nonzero_number)
                .unwrap_or(DEFAULT_IMPACT_CONFIDENCE)
                .clamp(0.0, 1.0);

            Some(ImpactTimeEstimate {
                arrival_time,
                confidence,
            })
        })
        .collect()
}

/// Build an activity snapshot from a list of raw records.
pub fn process_records(records: &[Value]) -> SolarActivity {
    SolarActivity::new(
        records.iter().map(normalize_value).collect(),
        estimate_impact_times(records),
    )
}

/// Build an activity snapshot from a JSON payload that should be an array of records.
///
/// A payload that is not an array yields an empty snapshot.
pub fn process_solar_data(data: &Value) -> SolarActivity {
    match data.as_array() {
        Some(records) => process_records(records),
        None => {
            log::warn!(
                "Expected an array of solar records, found {}; returning empty activity",
                json_kind(data)
            );
            SolarActivity::empty()
        }
    }
}

/// The three DONKI feeds of one ingestion cycle, as fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarFeeds {
    pub cme: Value,
    pub flares: Value,
    pub high_speed_streams: Value,
}

impl SolarFeeds {
    pub fn new(cme: Value, flares: Value, high_speed_streams: Value) -> Self {
        Self {
            cme,
            flares,
            high_speed_streams,
        }
    }

    /// Merge the feeds (CME, then flares, then tagged streams) into one snapshot.
    ///
    /// A feed that is not a JSON array contributes no records.
    pub fn into_activity(self) -> SolarActivity {
        let mut records = Vec::new();
        records.extend(feed_records(self.cme, "CME"));
        records.extend(feed_records(self.flares, "FLR"));
        records.extend(
            feed_records(self.high_speed_streams, "HSS")
                .into_iter()
                .map(tag_high_speed_stream),
        );
        process_records(&records)
    }
}

fn feed_records(feed: Value, name: &str) -> Vec<Value> {
    match feed {
        Value::Array(records) => records,
        Value::Null => Vec::new(),
        other => {
            log::warn!(
                "{} feed is not an array (found {}); ignoring it",
                name,
                json_kind(&other)
            );
            Vec::new()
        }
    }
}
