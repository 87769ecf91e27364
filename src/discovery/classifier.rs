//! Indoor / outdoor classification of places from their type tags

use serde::{Deserialize, Serialize};

/// Where a visit to a place mostly happens
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Indoor,
    Outdoor,
    Mixed,
}

const INDOOR_TYPES: &[&str] = &[
    "restaurant",
    "cafe",
    "bar",
    "museum",
    "shopping_mall",
    "gym",
    "library",
    "movie_theater",
    "spa",
    "bowling_alley",
    "casino",
    "night_club",
    "store",
    "supermarket",
    "book_store",
    "clothing_store",
    "department_store",
    "electronics_store",
    "furniture_store",
    "home_goods_store",
    "jewelry_store",
    "shoe_store",
    "art_gallery",
    "aquarium",
];

const OUTDOOR_TYPES: &[&str] = &[
    "park",
    "campground",
    "zoo",
    "amusement_park",
    "stadium",
    "tourist_attraction",
    "natural_feature",
];

/// True when any tag is a known indoor type
#[must_use]
pub fn is_indoor_place<S: AsRef<str>>(types: &[S]) -> bool {
    types.iter().any(|t| INDOOR_TYPES.contains(&t.as_ref()))
}

/// True when any tag is a known outdoor type
#[must_use]
pub fn is_outdoor_place<S: AsRef<str>>(types: &[S]) -> bool {
    types.iter().any(|t| OUTDOOR_TYPES.contains(&t.as_ref()))
}

/// Classify a place; hitting both tables or neither yields `Mixed`
#[must_use]
pub fn classify<S: AsRef<str>>(types: &[S]) -> PlaceCategory {
    match (is_indoor_place(types), is_outdoor_place(types)) {
        (true, false) => PlaceCategory::Indoor,
        (false, true) => PlaceCategory::Outdoor,
        _ => PlaceCategory::Mixed,
    }
}
