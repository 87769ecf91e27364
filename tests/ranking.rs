//! End-to-end ranking through the public API

use chrono::{TimeZone, Utc};

use weatherwise::discovery::{RankingInput, rank_places_at};
use weatherwise::models::{DayTime, OpeningHours, OpeningPeriod};
use weatherwise::{GeoPoint, Place, WeatherCategory};

/// Roughly `km` kilometres north of the origin
fn north_of_origin(km: f64) -> GeoPoint {
    GeoPoint::new(km / 111.195, 0.0)
}

#[test]
fn rainy_day_prefers_open_indoor_places() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

    let museum = Place::new("museum", "City Museum", north_of_origin(1.0))
        .with_types(["museum"])
        .with_rating(4.5);
    let park = Place::new("park", "Riverside Park", north_of_origin(0.2)).with_types(["park"]);
    // Saturday 09:00-11:00 only, so closed at noon
    let cafe = Place::new("cafe", "Morning Cafe", north_of_origin(0.1))
        .with_types(["cafe"])
        .with_opening_hours(OpeningHours {
            open_now: None,
            periods: Some(vec![OpeningPeriod {
                open: DayTime::new(6, 9, 0),
                close: DayTime::new(6, 11, 0),
            }]),
        });

    let ranked = rank_places_at(
        RankingInput {
            places: vec![park, cafe, museum],
            user_location: GeoPoint::new(0.0, 0.0),
            weather_category: WeatherCategory::Rainy,
            timezone_id: "UTC".to_string(),
        },
        now,
    );

    let ids: Vec<&str> = ranked.iter().map(|r| r.place.id.as_str()).collect();
    assert_eq!(ids, vec!["museum", "cafe", "park"]);

    // 50 + 30 + 20 - 5 + 7.5 = 102.5
    assert_eq!(ranked[0].score, 103);
    assert!(ranked[0].explanation.starts_with("Great choice for rainy weather"));

    // 50 + 30 - 20 - 0.5 = 59.5
    let cafe = &ranked[1];
    assert!(!cafe.is_open);
    assert_eq!(cafe.score, 60);
    assert!(cafe.explanation.ends_with("(currently closed)"));

    // 50 - 10 + 20 - 1 = 59
    assert_eq!(ranked[2].score, 59);
    assert!(ranked[2].is_open);
}

#[test]
fn empty_input_yields_empty_output() {
    let ranked = rank_places_at(
        RankingInput {
            places: Vec::new(),
            user_location: GeoPoint::new(10.0, 10.0),
            weather_category: WeatherCategory::Clear,
            timezone_id: "Europe/Berlin".to_string(),
        },
        Utc::now(),
    );
    assert!(ranked.is_empty());
}
