#[cfg(test)]
mod tests {
    use crate::core::domain::{
        EventCategory, FlareClass, FlareClassification, GeoLocation, SolarActivity, SolarEvent,
    };
    use crate::error::ForecastError;

    #[test]
    fn test_flare_speed_by_class() {
        assert_eq!(FlareClassification::new("X5").derived_speed(), 5000.0);
        assert_eq!(FlareClassification::new("M2").derived_speed(), 200.0);
        assert_eq!(FlareClassification::new("C1").derived_speed(), 10.0);
        assert_eq!(FlareClassification::new("B9").derived_speed(), 0.0);
    }

    #[test]
    fn test_flare_class_is_case_insensitive() {
        assert_eq!(FlareClassification::new("x2.5").class(), FlareClass::X);
        assert_eq!(FlareClassification::new("x2.5").derived_speed(), 2500.0);
        assert_eq!(FlareClassification::new("c3").derived_speed(), 30.0);
    }

    #[test]
    fn test_flare_magnitude_uses_leading_number() {
        assert!((FlareClassification::new("X5.2").derived_speed() - 5200.0).abs() < 1e-9);
        assert_eq!(FlareClassification::new("M1.0/2B").magnitude(), 1.0);
        assert_eq!(FlareClassification::new("M 3").magnitude(), 3.0);
    }

    #[test]
    fn test_flare_magnitude_accepts_exponent() {
        assert_eq!(FlareClassification::new("X1e1").derived_speed(), 10000.0);
        assert_eq!(FlareClassification::new("M2.5E-1").magnitude(), 0.25);
        assert_eq!(FlareClassification::new("C3e").magnitude(), 3.0);
        assert_eq!(FlareClassification::new("C3e+").magnitude(), 3.0);
        assert_eq!(FlareClassification::new("M.5").magnitude(), 0.5);
    }

    #[test]
    fn test_flare_garbled_input_yields_zero_speed() {
        assert_eq!(FlareClassification::new("").derived_speed(), 0.0);
        assert_eq!(FlareClassification::new("X").derived_speed(), 0.0);
        assert_eq!(FlareClassification::new("Xabc").derived_speed(), 0.0);
        assert_eq!(FlareClassification::new("??").class(), FlareClass::Other);
    }

    #[test]
    fn test_flare_negative_magnitude_is_clamped() {
        assert_eq!(FlareClassification::new("X-3").derived_speed(), 0.0);
    }

    #[test]
    fn test_category_labels() {
        let flare = EventCategory::SolarFlare(Some(FlareClassification::new("X5")));
        assert_eq!(flare.to_string(), "Solar Flare (X5)");
        assert_eq!(EventCategory::SolarFlare(None).to_string(), "Solar Flare (Unknown)");
        assert_eq!(
            EventCategory::cme("Unknown location").to_string(),
            "CME (Unknown location)"
        );
        let stream = EventCategory::HighSpeedStream {
            location: "CH 42".to_string(),
        };
        assert_eq!(stream.to_string(), "High Speed Stream (CH 42)");
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(
            EventCategory::from_label("Solar Flare (M1.4)"),
            EventCategory::SolarFlare(Some(FlareClassification::new("M1.4")))
        );
        assert_eq!(
            EventCategory::from_label("Solar Flare (Unknown)"),
            EventCategory::SolarFlare(None)
        );
        assert_eq!(
            EventCategory::from_label("High Speed Stream (Unknown location)"),
            EventCategory::HighSpeedStream {
                location: "Unknown location".to_string()
            }
        );
        assert_eq!(
            EventCategory::from_label("S (N10W20)"),
            EventCategory::Cme {
                kind: "S".to_string(),
                location: "N10W20".to_string()
            }
        );
        assert_eq!(
            EventCategory::from_label("CME"),
            EventCategory::cme("Unknown location")
        );
    }

    #[test]
    fn test_event_clamps_speed() {
        let event = SolarEvent::new(None, -12.0, EventCategory::cme("x"));
        assert_eq!(event.speed, 0.0);
        let event = SolarEvent::new(None, f64::NAN, EventCategory::cme("x"));
        assert_eq!(event.speed, 0.0);
    }

    #[test]
    fn test_activity_serializes_dashboard_shape() {
        let activity = SolarActivity::new(
            vec![SolarEvent::new(
                None,
                800.0,
                EventCategory::SolarFlare(Some(FlareClassification::new("X5"))),
            )],
            vec![],
        );
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["cmeEvents"][0]["type"], "Solar Flare (X5)");
        assert_eq!(json["cmeEvents"][0]["speed"], 800.0);
        assert!(json["estimatedImpactTimes"].as_array().unwrap().is_empty());

        let back: SolarActivity = serde_json::from_value(json).unwrap();
        assert_eq!(back, activity);
    }

    #[test]
    fn test_geo_location_validation() {
        assert!(GeoLocation::new(68.91, 27.03).is_ok());
        assert_eq!(
            GeoLocation::new(91.0, 0.0),
            Err(ForecastError::InvalidLatitude(91.0))
        );
        assert_eq!(
            GeoLocation::new(0.0, -181.0),
            Err(ForecastError::InvalidLongitude(-181.0))
        );
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    }
}
