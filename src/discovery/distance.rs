//! Great-circle distance between two points

use haversine::{Location as HaversineLocation, Units, distance};

use crate::models::GeoPoint;

/// Haversine distance in kilometers on a sphere of radius 6371 km.
///
/// Inputs are not range-checked here; callers validate coordinates.
#[must_use]
pub fn distance_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let from_haversine = HaversineLocation {
        latitude: from.lat,
        longitude: from.lng,
    };
    let to_haversine = HaversineLocation {
        latitude: to.lat,
        longitude: to.lng,
    };
    distance(from_haversine, to_haversine, Units::Kilometers)
}

/// Format distance for display: meters below 1 km, otherwise one decimal km
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round())
    } else {
        format!("{km:.1}km")
    }
}
