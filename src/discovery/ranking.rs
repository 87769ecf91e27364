//! Weather-aware scoring and ordering of candidate places
//!
//! Score = 50 base
//!       + weather match (see [`weather_match_score`])
//!       + 20 when open, -20 when closed
//!       - 5 per km of distance, at most 25
//!       + (rating - 3) * 5 when a rating is known
//!
//! rounded half-up to an integer. Results are ordered by score (high first),
//! then distance (near first), then place id.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use super::classifier::{PlaceCategory, classify, is_indoor_place};
use super::distance::distance_km;
use super::open_status::is_open;
use crate::models::{GeoPoint, Place, ScoredPlace, WeatherCategory};

const BASE_SCORE: f64 = 50.0;
const OPEN_BONUS: f64 = 20.0;
const DISTANCE_PENALTY_PER_KM: f64 = 5.0;
const MAX_DISTANCE_PENALTY: f64 = 25.0;
const RATING_PIVOT: f64 = 3.0;
const RATING_WEIGHT: f64 = 5.0;
const CLOSED_SUFFIX: &str = " (currently closed)";

/// Everything one ranking pass needs
#[derive(Debug, Clone)]
pub struct RankingInput {
    pub places: Vec<Place>,
    pub user_location: GeoPoint,
    pub weather_category: WeatherCategory,
    /// IANA zone used to evaluate opening hours
    pub timezone_id: String,
}

/// Rank places as of the current instant
#[must_use]
pub fn rank_places(input: RankingInput) -> Vec<ScoredPlace> {
    rank_places_at(input, Utc::now())
}

/// Rank places as of `now`.
///
/// Returns every input place exactly once.
#[must_use]
#[instrument(skip_all, fields(places = input.places.len(), weather = %input.weather_category, timezone = %input.timezone_id))]
pub fn rank_places_at(input: RankingInput, now: DateTime<Utc>) -> Vec<ScoredPlace> {
    let RankingInput {
        places,
        user_location,
        weather_category,
        timezone_id,
    } = input;

    let mut scored: Vec<ScoredPlace> = places
        .into_iter()
        .map(|place| {
            let distance = distance_km(&user_location, &place.location);
            let open = is_open(place.opening_hours.as_ref(), &timezone_id, now);
            let score = score_place(&place, distance, open, weather_category);
            let explanation = explain(&place.types, open, weather_category);

            ScoredPlace {
                place,
                score,
                distance,
                is_open: open,
                explanation,
            }
        })
        .collect();

    scored.sort_by(compare_ranked);

    if let Some(top) = scored.first() {
        debug!(
            top = %top.place.name,
            score = top.score,
            distance_km = top.distance,
            "Ranked {} places",
            scored.len()
        );
    }

    scored
}

/// Ordering of ranked places: score desc, distance asc, id asc
fn compare_ranked(a: &ScoredPlace, b: &ScoredPlace) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.distance.total_cmp(&b.distance))
        .then_with(|| a.place.id.cmp(&b.place.id))
}

/// Score one place given its precomputed distance and open status
#[must_use]
pub fn score_place(
    place: &Place,
    distance_km: f64,
    is_open: bool,
    weather_category: WeatherCategory,
) -> i64 {
    let category = classify(&place.types);

    let mut score = BASE_SCORE;
    score += f64::from(weather_match_score(category, weather_category));
    score += if is_open { OPEN_BONUS } else { -OPEN_BONUS };
    score -= (distance_km * DISTANCE_PENALTY_PER_KM).min(MAX_DISTANCE_PENALTY);

    if let Some(rating) = place.rating {
        score += (rating - RATING_PIVOT) * RATING_WEIGHT;
    }

    round_half_up(score)
}

/// Bonus for how well a place category suits the weather
#[must_use]
pub fn weather_match_score(category: PlaceCategory, weather: WeatherCategory) -> i32 {
    match (weather, category) {
        (WeatherCategory::Rainy, PlaceCategory::Indoor) => 30,
        (WeatherCategory::Rainy, PlaceCategory::Mixed) => 10,
        (WeatherCategory::Rainy, PlaceCategory::Outdoor) => -10,

        (WeatherCategory::Hot, PlaceCategory::Indoor) => 25,
        (WeatherCategory::Hot, PlaceCategory::Mixed) => 10,
        (WeatherCategory::Hot, PlaceCategory::Outdoor) => 0,

        (WeatherCategory::Cold, PlaceCategory::Indoor) => 25,
        (WeatherCategory::Cold, PlaceCategory::Mixed) => 10,
        (WeatherCategory::Cold, PlaceCategory::Outdoor) => -5,

        (WeatherCategory::Clear, PlaceCategory::Indoor) => 5,
        (WeatherCategory::Clear, PlaceCategory::Mixed) => 15,
        (WeatherCategory::Clear, PlaceCategory::Outdoor) => 30,
    }
}

/// One-sentence reason for the recommendation.
///
/// Framing is indoor whenever any tag is an indoor type, even for places
/// that also carry outdoor tags.
#[must_use]
pub fn explain<S: AsRef<str>>(types: &[S], is_open: bool, weather: WeatherCategory) -> String {
    let indoor = is_indoor_place(types);

    let reason = match (weather, indoor) {
        (WeatherCategory::Rainy, true) => "Great choice for rainy weather — stay dry indoors",
        (WeatherCategory::Rainy, false) => "Outdoor spot, but might want to wait for better weather",
        (WeatherCategory::Hot, true) => "Perfect for hot weather — enjoy the AC",
        (WeatherCategory::Hot, false) => "Outdoor location — consider visiting in cooler hours",
        (WeatherCategory::Cold, true) => "Warm indoor spot for cold weather",
        (WeatherCategory::Cold, false) => "Outdoor spot — bundle up!",
        (WeatherCategory::Clear, true) => "Nice indoor option for clear weather",
        (WeatherCategory::Clear, false) => "Great outdoor spot for clear weather",
    };

    if is_open {
        reason.to_string()
    } else {
        format!("{reason}{CLOSED_SUFFIX}")
    }
}

/// Nearest integer, halves toward positive infinity (102.5 → 103, -2.5 → -2)
#[allow(clippy::cast_possible_truncation)]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
