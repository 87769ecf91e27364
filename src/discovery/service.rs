//! Discovery orchestration: fetch context in parallel, then rank

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::ranking::{RankingInput, rank_places_at};
use crate::Result;
use crate::models::{GeoPoint, ScoredPlace, Weather};
use crate::providers::{PlacesProvider, Providers, TimezoneProvider, WeatherProvider};

/// Payload returned to the client for one discovery request
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    pub weather: Weather,
    /// Local time at the searched location, RFC 3339
    pub local_time: String,
    /// IANA zone of the searched location
    pub timezone: String,
    pub recommendations: Vec<ScoredPlace>,
}

#[derive(Clone)]
pub struct DiscoveryService {
    places: Arc<dyn PlacesProvider>,
    weather: Arc<dyn WeatherProvider>,
    timezone: Arc<dyn TimezoneProvider>,
    search_radius_m: u32,
}

impl DiscoveryService {
    pub fn new(
        places: Arc<dyn PlacesProvider>,
        weather: Arc<dyn WeatherProvider>,
        timezone: Arc<dyn TimezoneProvider>,
        search_radius_m: u32,
    ) -> Self {
        Self {
            places,
            weather,
            timezone,
            search_radius_m,
        }
    }

    #[must_use]
    pub fn from_providers(providers: &Providers, search_radius_m: u32) -> Self {
        Self::new(
            Arc::clone(&providers.places),
            Arc::clone(&providers.weather),
            Arc::clone(&providers.timezone),
            search_radius_m,
        )
    }

    /// Ranked recommendations around `(lat, lng)`, optionally narrowed by a free-text query
    pub async fn discover(&self, lat: f64, lng: f64, query: Option<&str>) -> Result<DiscoveryResponse> {
        self.discover_at(lat, lng, query, Utc::now()).await
    }

    #[instrument(skip(self, now))]
    pub async fn discover_at(
        &self,
        lat: f64,
        lng: f64,
        query: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<DiscoveryResponse> {
        let location = GeoPoint::validated(lat, lng)?;
        let keyword = query.map(str::trim).filter(|q| !q.is_empty());

        let (weather, places, timezone) = futures::try_join!(
            self.weather.current_weather(location),
            self.places.nearby_places(location, self.search_radius_m, keyword),
            self.timezone.timezone(location, now),
        )?;

        info!(
            places = places.len(),
            weather = %weather.category,
            timezone = %timezone.timezone_id,
            "Fetched discovery context"
        );

        let recommendations = rank_places_at(
            RankingInput {
                places,
                user_location: location,
                weather_category: weather.category,
                timezone_id: timezone.timezone_id.clone(),
            },
            now,
        );

        Ok(DiscoveryResponse {
            weather,
            local_time: timezone.local_time,
            timezone: timezone.timezone_id,
            recommendations,
        })
    }
}
