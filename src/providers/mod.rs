//! External data providers
//!
//! Each upstream service sits behind a trait so the discovery service and the
//! HTTP API can run against fakes in tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::WeatherWiseConfig;
use crate::models::{
    GeoPoint, GeocodeResult, Place, Prediction, ReverseGeocodeResult, TimezoneInfo, Weather,
};
use crate::{Result, WeatherWiseError};

pub mod google_places;
pub mod google_timezone;
pub mod http;
pub mod open_meteo;

pub use google_places::GooglePlacesClient;
pub use google_timezone::GoogleTimezoneClient;
pub use open_meteo::OpenMeteoClient;

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Candidate places within `radius_m` metres of `center`
    async fn nearby_places(
        &self,
        center: GeoPoint,
        radius_m: u32,
        keyword: Option<&str>,
    ) -> Result<Vec<Place>>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, point: GeoPoint) -> Result<Weather>;
}

#[async_trait]
pub trait TimezoneProvider: Send + Sync {
    async fn timezone(&self, point: GeoPoint, now: DateTime<Utc>) -> Result<TimezoneInfo>;
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Best match for a free-text query, `None` when nothing matched
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>>;

    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Option<ReverseGeocodeResult>>;

    async fn autocomplete(&self, input: &str) -> Result<Vec<Prediction>>;
}

/// The full set of providers the application runs against
#[derive(Clone)]
pub struct Providers {
    pub places: Arc<dyn PlacesProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub timezone: Arc<dyn TimezoneProvider>,
    pub geocoding: Arc<dyn GeocodingProvider>,
}

impl Providers {
    /// Build the production providers sharing one retrying HTTP client
    pub fn from_config(config: &WeatherWiseConfig) -> Result<Self> {
        let api_key = config
            .places
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| WeatherWiseError::config("PLACES_API_KEY is not configured"))?;

        let client = http::build_client(&config.http)?;

        let places = Arc::new(GooglePlacesClient::new(
            client.clone(),
            &config.places.base_url,
            api_key,
            config.places.max_results,
        ));
        let timezone = Arc::new(GoogleTimezoneClient::new(
            client.clone(),
            &config.places.base_url,
            api_key,
        ));
        let weather = Arc::new(OpenMeteoClient::new(client, &config.weather.base_url));

        Ok(Self {
            places: places.clone(),
            weather,
            timezone,
            geocoding: places,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_api_key() {
        let mut config = WeatherWiseConfig::default();
        config.places.api_key = None;
        let err = Providers::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("PLACES_API_KEY"));

        config.places.api_key = Some("   ".to_string());
        assert!(Providers::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_with_key() {
        let mut config = WeatherWiseConfig::default();
        config.places.api_key = Some("test-key".to_string());
        assert!(Providers::from_config(&config).is_ok());
    }
}
