//! Geographic point used for the user position and place locations

use serde::{Deserialize, Serialize};

use crate::{Result, WeatherWiseError};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, -90..=90
    pub lat: f64,
    /// Longitude in decimal degrees, -180..=180
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point without range checks
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a point, rejecting out-of-range or non-finite coordinates
    pub fn validated(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(WeatherWiseError::validation(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            )));
        }

        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(WeatherWiseError::validation(format!(
                "Longitude must be between -180 and 180, got: {lng}"
            )));
        }

        Ok(Self { lat, lng })
    }

    /// Format as `"lat,lng"`, the form the Google endpoints expect
    #[must_use]
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_validated_accepts_bounds() {
        assert!(GeoPoint::validated(90.0, 180.0).is_ok());
        assert!(GeoPoint::validated(-90.0, -180.0).is_ok());
    }

    #[rstest]
    #[case(90.1, 0.0)]
    #[case(-91.0, 0.0)]
    #[case(0.0, 180.5)]
    #[case(0.0, -181.0)]
    #[case(f64::NAN, 0.0)]
    fn test_validated_rejects_out_of_range(#[case] lat: f64, #[case] lng: f64) {
        let err = GeoPoint::validated(lat, lng).unwrap_err();
        assert!(matches!(err, WeatherWiseError::Validation { .. }));
    }

    #[test]
    fn test_formatting() {
        let point = GeoPoint::new(46.818_234, 8.227_456);
        assert_eq!(point.format_coordinates(), "46.8182, 8.2275");
        assert_eq!(
            GeoPoint::new(1.5, -2.25).to_query_value(),
            "1.5,-2.25"
        );
    }
}
