//! Google Places / Geocoding adapter
//!
//! Nearby search feeds the ranking engine; text search, reverse geocoding and
//! autocomplete back the location picker endpoints.

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::http::get_json;
use super::{GeocodingProvider, PlacesProvider};
use crate::models::{
    DayTime, GeoPoint, GeocodeResult, OpeningHours, OpeningPeriod, Place, Prediction,
    ReverseGeocodeResult,
};
use crate::{Result, WeatherWiseError};

const PROVIDER: &str = "Places API";

/// Types searched when the user gave no free-text query
const DEFAULT_PLACE_TYPES: &str =
    "restaurant|cafe|bar|museum|park|shopping_mall|gym|library|movie_theater";

const REVERSE_GEOCODE_RESULT_TYPES: &str = "locality|administrative_area_level_1|country";

/// Client for the Google Maps web services that share the Places API key
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
    max_results: usize,
}

impl GooglePlacesClient {
    pub fn new(
        client: ClientWithMiddleware,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        max_results: usize,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            max_results,
        }
    }

    fn nearby_url(&self, center: GeoPoint, radius_m: u32, keyword: Option<&str>) -> String {
        let filter = match keyword {
            Some(keyword) => format!("keyword={}", urlencoding::encode(keyword)),
            None => format!("type={}", urlencoding::encode(DEFAULT_PLACE_TYPES)),
        };
        format!(
            "{}/place/nearbysearch/json?location={}&radius={}&{}&key={}",
            self.base_url,
            center.to_query_value(),
            radius_m,
            filter,
            urlencoding::encode(&self.api_key)
        )
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "{}/place/photo?maxwidth=400&photo_reference={}&key={}",
            self.base_url,
            urlencoding::encode(photo_reference),
            urlencoding::encode(&self.api_key)
        )
    }

    fn to_place(&self, raw: NearbyPlace) -> Place {
        let location = GeoPoint::new(raw.geometry.location.lat, raw.geometry.location.lng);
        let photo_url = raw
            .photos
            .first()
            .map(|photo| self.photo_url(&photo.photo_reference));

        Place {
            google_maps_url: Some(google_maps_url(location, &raw.place_id)),
            id: raw.place_id,
            name: raw.name,
            types: raw.types,
            location,
            opening_hours: raw.opening_hours.map(normalize_opening_hours),
            rating: raw.rating,
            vicinity: raw.vicinity,
            photo_url,
        }
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    #[instrument(skip(self), fields(lat = center.lat, lng = center.lng))]
    async fn nearby_places(
        &self,
        center: GeoPoint,
        radius_m: u32,
        keyword: Option<&str>,
    ) -> Result<Vec<Place>> {
        info!("Fetching nearby places");
        let url = self.nearby_url(center, radius_m, keyword);
        let response: NearbySearchResponse = get_json(&self.client, PROVIDER, &url).await?;
        ensure_ok(&response.status, response.error_message.as_deref())?;

        let places: Vec<Place> = response
            .results
            .into_iter()
            .take(self.max_results)
            .map(|raw| self.to_place(raw))
            .collect();

        info!("Found {} places", places.len());
        Ok(places)
    }
}

#[async_trait]
impl GeocodingProvider for GooglePlacesClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<GeocodeResult>> {
        let url = format!(
            "{}/place/textsearch/json?query={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        );
        let response: TextSearchResponse = get_json(&self.client, PROVIDER, &url).await?;
        // A rejected text search reads as "no match" to the location picker
        if let Err(e) = ensure_ok(&response.status, response.error_message.as_deref()) {
            warn!(error = %e, "Text search failed");
            return Ok(None);
        }

        let result = response.results.into_iter().next().map(|first| GeocodeResult {
            name: first.name,
            address: first.formatted_address,
            lat: first.geometry.location.lat,
            lng: first.geometry.location.lng,
            place_id: first.place_id,
        });
        debug!(found = result.is_some(), "Geocoded query");
        Ok(result)
    }

    #[instrument(skip(self), fields(lat = point.lat, lng = point.lng))]
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Option<ReverseGeocodeResult>> {
        let url = format!(
            "{}/geocode/json?latlng={}&result_type={}&key={}",
            self.base_url,
            point.to_query_value(),
            urlencoding::encode(REVERSE_GEOCODE_RESULT_TYPES),
            urlencoding::encode(&self.api_key)
        );
        let response: ReverseGeocodeResponse = get_json(&self.client, PROVIDER, &url).await?;

        let Some(primary) = response.results.into_iter().next() else {
            debug!(status = %response.status, "No reverse geocoding results");
            return Ok(None);
        };

        let component = |kind: &str, short: bool| {
            primary
                .address_components
                .iter()
                .find(|c| c.types.iter().any(|t| t == kind))
                .map(|c| if short { c.short_name.clone() } else { c.long_name.clone() })
        };

        Ok(Some(ReverseGeocodeResult::new(
            component("locality", false),
            component("administrative_area_level_1", true),
            component("country", false),
            primary.formatted_address.clone(),
        )))
    }

    #[instrument(skip(self))]
    async fn autocomplete(&self, input: &str) -> Result<Vec<Prediction>> {
        let url = format!(
            "{}/place/autocomplete/json?input={}&types=geocode&key={}",
            self.base_url,
            urlencoding::encode(input),
            urlencoding::encode(&self.api_key)
        );
        let response: AutocompleteResponse = get_json(&self.client, PROVIDER, &url).await?;
        ensure_ok(&response.status, response.error_message.as_deref())?;

        Ok(response
            .predictions
            .into_iter()
            .map(|p| Prediction {
                description: p.description,
                place_id: p.place_id,
            })
            .collect())
    }
}

fn ensure_ok(status: &str, error_message: Option<&str>) -> Result<()> {
    if status == "OK" || status == "ZERO_RESULTS" {
        Ok(())
    } else {
        Err(WeatherWiseError::api(format!(
            "{PROVIDER} error: {status} - {}",
            error_message.unwrap_or("no error message")
        )))
    }
}

fn google_maps_url(location: GeoPoint, place_id: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}&query_place_id={}",
        location.lat,
        location.lng,
        urlencoding::encode(place_id)
    )
}

/// Parse Google's `"HHMM"` time into (hour, minute)
fn parse_time(time: &str) -> Option<(u8, u8)> {
    let hour: u8 = time.get(0..2)?.parse().ok()?;
    let minute: u8 = time.get(2..4)?.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

/// Convert provider hours; a period without a close time ends at 23:59 the same day
fn normalize_opening_hours(raw: RawOpeningHours) -> OpeningHours {
    let periods = raw.periods.map(|periods| {
        periods
            .into_iter()
            .filter_map(|period| {
                let (open_hour, open_minute) = parse_time(&period.open.time)?;
                let open = DayTime::new(period.open.day, open_hour, open_minute);

                let close = match period.close {
                    Some(close) => {
                        let (hour, minute) = parse_time(&close.time)?;
                        DayTime::new(close.day, hour, minute)
                    }
                    None => DayTime::new(period.open.day, 23, 59),
                };

                Some(OpeningPeriod { open, close })
            })
            .collect()
    });

    OpeningHours {
        open_now: raw.open_now,
        periods,
    }
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<NearbyPlace>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlace {
    place_id: String,
    name: String,
    #[serde(default)]
    types: Vec<String>,
    geometry: Geometry,
    opening_hours: Option<RawOpeningHours>,
    vicinity: Option<String>,
    rating: Option<f64>,
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct RawOpeningHours {
    open_now: Option<bool>,
    periods: Option<Vec<RawPeriod>>,
}

#[derive(Debug, Deserialize)]
struct RawPeriod {
    open: RawDayTime,
    close: Option<RawDayTime>,
}

#[derive(Debug, Deserialize)]
struct RawDayTime {
    day: u8,
    time: String,
}

#[derive(Debug, Deserialize)]
struct Photo {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<TextSearchResult>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResult {
    name: String,
    formatted_address: Option<String>,
    geometry: Geometry,
    place_id: String,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    #[serde(default)]
    results: Vec<ReverseGeocodeEntry>,
    #[serde(default)]
    status: String,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeEntry {
    #[serde(default)]
    address_components: Vec<AddressComponent>,
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    short_name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    predictions: Vec<RawPrediction>,
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    description: String,
    place_id: String,
}
