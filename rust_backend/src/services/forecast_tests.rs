#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::core::domain::{
        EventCategory, GeoLocation, NamedLocation, SolarActivity, SolarEvent,
    };
    use crate::error::ForecastError;
    use crate::services::forecast::{
        aurora_band_latitude, calculate_aurora_probability, calculate_probability,
        forecast_locations, snapshot_activity, visible_latitude_range, DEFAULT_BAND_LATITUDE,
    };

    fn single_cme(speed: f64) -> SolarActivity {
        SolarActivity::new(
            vec![SolarEvent::new(None, speed, EventCategory::cme("CME"))],
            vec![],
        )
    }

    #[test]
    fn test_northern_location_has_higher_probability() {
        let activity = single_cme(800.0);
        let helsinki = GeoLocation::new(60.17, 24.94).unwrap();
        let inari = GeoLocation::new(68.91, 27.03).unwrap();

        let south = calculate_aurora_probability(&activity, &helsinki);
        let north = calculate_aurora_probability(&activity, &inari);

        assert!(north.probability > south.probability);
    }

    #[test]
    fn test_zero_probability_below_55_degrees() {
        let activity = single_cme(800.0);
        let location = GeoLocation::new(50.0, 24.94).unwrap();
        let forecast = calculate_aurora_probability(&activity, &location);
        assert_eq!(forecast.probability, 0.0);
    }

    #[test]
    fn test_strong_cme_widens_visible_range() {
        let activity = single_cme(1200.0);
        let location = GeoLocation::new(65.0, 25.0).unwrap();
        let forecast = calculate_aurora_probability(&activity, &location);

        assert!(forecast.visible_latitude_range.min.value() < 65.0);
        assert_eq!(forecast.visible_latitude_range.max.value(), 90.0);
    }

    #[test]
    fn test_probability_formula() {
        let expected = ((68.91 - 55.0) / 35.0) * (2.0 / 9.0) * 100.0 / 100.0;
        assert!((calculate_probability(2.0, 68.91) - expected).abs() < 1e-12);
        assert!((calculate_probability(2.0, -68.91) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_probability_boundaries() {
        assert_eq!(calculate_probability(5.0, 54.999), 0.0);
        assert_eq!(calculate_probability(5.0, 55.0), 0.0);
        assert_eq!(calculate_probability(0.0, 80.0), 0.0);
        assert_eq!(calculate_probability(9.0, 90.0), 1.0);
        assert_eq!(calculate_probability(50.0, 70.0), 1.0);
    }

    #[test]
    fn test_visible_range_floor() {
        assert_eq!(visible_latitude_range(0.0).min.value(), 65.0);
        assert_eq!(visible_latitude_range(2.0).min.value(), 62.0);
        assert_eq!(visible_latitude_range(10.0).min.value(), 50.0);
        assert_eq!(visible_latitude_range(100.0).min.value(), 50.0);
    }

    #[test]
    fn test_snapshot_activity_uses_top_three() {
        let activity = SolarActivity::new(
            vec![
                SolarEvent::new(None, 300.0, EventCategory::cme("a")),
                SolarEvent::new(None, 1500.0, EventCategory::cme("b")),
                SolarEvent::new(None, 700.0, EventCategory::cme("c")),
                SolarEvent::new(None, 900.0, EventCategory::cme("d")),
            ],
            vec![],
        );
        assert!((snapshot_activity(&activity) - 1.5).abs() < 1e-12);
        assert_eq!(snapshot_activity(&SolarActivity::empty()), 0.0);
    }

    #[test]
    fn test_forecast_serializes_dashboard_shape() {
        let location = GeoLocation::new(65.01, 25.47).unwrap();
        let forecast = calculate_aurora_probability(&single_cme(900.0), &location);
        let json = serde_json::to_value(forecast).unwrap();

        assert!(json["probability"].is_number());
        assert_eq!(json["visibleLatitudeRange"]["max"], 90.0);
        assert!(json["visibleLatitudeRange"]["min"].is_number());
    }

    #[test]
    fn test_forecast_locations_preserves_order() {
        let locations = vec![
            NamedLocation::new("Inari", 68.91, 27.03),
            NamedLocation::new("Helsinki", 60.17, 24.94),
            NamedLocation::new("Tallinn", 59.44, 24.75),
        ];
        let forecasts = forecast_locations(&single_cme(1800.0), &locations).unwrap();

        let names: Vec<&str> = forecasts.iter().map(|f| f.location.name.as_str()).collect();
        assert_eq!(names, vec!["Inari", "Helsinki", "Tallinn"]);
        assert!(forecasts[0].forecast.probability > forecasts[1].forecast.probability);
    }

    #[test]
    fn test_forecast_locations_rejects_bad_coordinates() {
        let locations = vec![NamedLocation::new("Nowhere", 120.0, 0.0)];
        assert_eq!(
            forecast_locations(&single_cme(800.0), &locations),
            Err(ForecastError::InvalidLatitude(120.0))
        );
    }

    #[test]
    fn test_band_latitude() {
        let locations = vec![
            NamedLocation::new("Kilpisjärvi", 69.05, 20.79),
            NamedLocation::new("Inari", 68.91, 27.03),
            NamedLocation::new("Helsinki", 60.17, 24.94),
        ];

        let quiet = forecast_locations(&single_cme(400.0), &locations).unwrap();
        assert_eq!(aurora_band_latitude(&quiet), DEFAULT_BAND_LATITUDE);

        let storm = forecast_locations(&single_cme(40000.0), &locations).unwrap();
        assert!(storm.iter().all(|f| f.forecast.probability > 0.5));
        let expected = (69.05 + 68.91 + 60.17) / 3.0;
        assert!((aurora_band_latitude(&storm) - expected).abs() < 1e-9);

        assert_eq!(aurora_band_latitude(&[]), DEFAULT_BAND_LATITUDE);
    }

    proptest! {
        #[test]
        fn prop_zero_below_threshold(activity in 0.0f64..50.0, latitude in -54.999f64..54.999) {
            prop_assert_eq!(calculate_probability(activity, latitude), 0.0);
        }

        #[test]
        fn prop_probability_in_unit_interval(activity in 0.0f64..50.0, latitude in -90.0f64..=90.0) {
            let p = calculate_probability(activity, latitude);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn prop_monotonic_in_latitude(activity in 0.0f64..20.0, a in 0.0f64..=90.0, b in 0.0f64..=90.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(calculate_probability(activity, low) <= calculate_probability(activity, high));
            prop_assert!(calculate_probability(activity, -low) <= calculate_probability(activity, -high));
        }

        #[test]
        fn prop_monotonic_in_activity(latitude in 55.0f64..=90.0, a in 0.0f64..20.0, b in 0.0f64..20.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(calculate_probability(low, latitude) <= calculate_probability(high, latitude));
        }

        #[test]
        fn prop_visible_range_shape(a in 0.0f64..50.0, b in 0.0f64..50.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let range_low = visible_latitude_range(low);
            let range_high = visible_latitude_range(high);

            prop_assert_eq!(range_low.max.value(), 90.0);
            prop_assert_eq!(range_high.max.value(), 90.0);
            prop_assert!(range_high.min.value() <= range_low.min.value());
            prop_assert!(range_high.min.value() >= 50.0);
        }
    }
}
