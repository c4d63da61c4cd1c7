//! Event series for the solar activity timeline chart.
//!
//! Events are grouped by category into three series of bubble points, each point
//! sized by speed. Only events with a positive speed are plotted.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::domain::{EventCategory, SolarActivity, SolarEvent};

/// Speed (km/s) per unit of bubble radius.
const RADIUS_DIVISOR: f64 = 50.0;

/// Series a timeline point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKind {
    SolarFlares,
    CoronalMassEjections,
    HighSpeedStreams,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 3] = [
        SeriesKind::SolarFlares,
        SeriesKind::CoronalMassEjections,
        SeriesKind::HighSpeedStreams,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::SolarFlares => "Solar Flares",
            SeriesKind::CoronalMassEjections => "Coronal Mass Ejections",
            SeriesKind::HighSpeedStreams => "High Speed Streams",
        }
    }

    fn of(category: &EventCategory) -> Self {
        match category {
            EventCategory::SolarFlare(_) => SeriesKind::SolarFlares,
            EventCategory::Cme { .. } => SeriesKind::CoronalMassEjections,
            EventCategory::HighSpeedStream { .. } => SeriesKind::HighSpeedStreams,
        }
    }
}

/// One bubble on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPoint {
    pub time: Option<DateTime<Utc>>,
    pub speed: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSeries {
    pub kind: SeriesKind,
    pub label: &'static str,
    pub points: Vec<EventPoint>,
}

/// Build the three timeline series, fastest events first within each series.
///
/// All three series are always returned, possibly empty.
pub fn build_event_series(activity: &SolarActivity) -> Vec<EventSeries> {
    let mut plotted: Vec<&SolarEvent> = activity
        .cme_events
        .iter()
        .filter(|event| event.speed > 0.0)
        .collect();
    plotted.sort_by(|a, b| b.speed.partial_cmp(&a.speed).unwrap_or(Ordering::Equal));

    SeriesKind::ALL
        .iter()
        .map(|&kind| EventSeries {
            kind,
            label: kind.label(),
            points: plotted
                .iter()
                .filter(|event| SeriesKind::of(&event.category) == kind)
                .map(|event| EventPoint {
                    time: event.start_time,
                    speed: event.speed,
                    radius: event.speed / RADIUS_DIVISOR,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::FlareClassification;

    #[test]
    fn test_series_grouping_and_order() {
        let activity = SolarActivity::new(
            vec![
                SolarEvent::new(None, 500.0, EventCategory::cme("a")),
                SolarEvent::new(
                    None,
                    5000.0,
                    EventCategory::SolarFlare(Some(FlareClassification::new("X5"))),
                ),
                SolarEvent::new(None, 900.0, EventCategory::cme("b")),
                SolarEvent::new(
                    None,
                    400.0,
                    EventCategory::HighSpeedStream {
                        location: "CH".to_string(),
                    },
                ),
                SolarEvent::new(None, 0.0, EventCategory::cme("c")),
            ],
            vec![],
        );

        let series = build_event_series(&activity);
        assert_eq!(series.len(), 3);

        assert_eq!(series[0].kind, SeriesKind::SolarFlares);
        assert_eq!(series[0].points.len(), 1);
        assert_eq!(series[0].points[0].radius, 100.0);

        let cme_speeds: Vec<f64> = series[1].points.iter().map(|p| p.speed).collect();
        assert_eq!(cme_speeds, vec![900.0, 500.0]);

        assert_eq!(series[2].label, "High Speed Streams");
        assert_eq!(series[2].points.len(), 1);
        assert_eq!(series[2].points[0].radius, 8.0);
    }

    #[test]
    fn test_series_empty_activity() {
        let series = build_event_series(&SolarActivity::empty());
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.points.is_empty()));
    }
}
