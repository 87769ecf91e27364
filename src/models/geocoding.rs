//! Results of forward/reverse geocoding and search-box autocomplete

use serde::{Deserialize, Serialize};

/// Best match for a free-text location query
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub place_id: String,
}

/// Human-readable description of a coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ReverseGeocodeResult {
    pub label: Option<String>,
    pub city: Option<String>,
    pub admin: Option<String>,
    pub country: Option<String>,
    pub formatted: Option<String>,
}

impl ReverseGeocodeResult {
    /// Build a result, deriving the display label.
    ///
    /// `"city[, admin], country"` when city and country are known, else the
    /// formatted address, else the country alone.
    #[must_use]
    pub fn new(
        city: Option<String>,
        admin: Option<String>,
        country: Option<String>,
        formatted: Option<String>,
    ) -> Self {
        let label = match (&city, &country) {
            (Some(city), Some(country)) => Some(match &admin {
                Some(admin) => format!("{city}, {admin}, {country}"),
                None => format!("{city}, {country}"),
            }),
            _ => formatted.clone().or_else(|| country.clone()),
        };

        Self {
            label,
            city,
            admin,
            country,
            formatted,
        }
    }
}

/// One autocomplete suggestion
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub description: String,
    pub place_id: String,
}
