//! Open-Meteo forecast adapter (no API key required)

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{info, instrument};

use super::WeatherProvider;
use super::http::get_json;
use crate::models::GeoPoint;
use crate::models::weather::{
    CurrentConditions, DailyForecast, HourlyForecast, Weather, categorize_weather,
    weather_condition, weather_description, weather_icon,
};
use crate::{Result, WeatherWiseError};

const PROVIDER: &str = "Open-Meteo";

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";
const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(client: ClientWithMiddleware, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn forecast_url(&self, point: GeoPoint) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone=auto",
            self.base_url, point.lat, point.lng, CURRENT_FIELDS, HOURLY_FIELDS, DAILY_FIELDS
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = point.lat, lng = point.lng))]
    async fn current_weather(&self, point: GeoPoint) -> Result<Weather> {
        let url = self.forecast_url(point);
        let response: openmeteo::ForecastResponse = get_json(&self.client, PROVIDER, &url).await?;
        let weather = Weather::from_open_meteo(response)?;
        info!(
            category = %weather.category,
            temperature = weather.temperature,
            "Fetched current weather"
        );
        Ok(weather)
    }
}

/// `OpenMeteo` API response structures
pub mod openmeteo {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
        pub hourly: Option<HourlyData>,
        pub daily: Option<DailyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub temperature_2m: f64,
        #[serde(default)]
        pub relative_humidity_2m: f64,
        pub apparent_temperature: Option<f64>,
        pub weather_code: u16,
        #[serde(default)]
        pub wind_speed_10m: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct HourlyData {
        #[serde(default)]
        pub time: Vec<String>,
        #[serde(default)]
        pub temperature_2m: Vec<Option<f64>>,
        #[serde(default)]
        pub precipitation_probability: Vec<Option<f64>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        #[serde(default)]
        pub time: Vec<String>,
        #[serde(default)]
        pub temperature_2m_max: Vec<Option<f64>>,
        #[serde(default)]
        pub temperature_2m_min: Vec<Option<f64>>,
        #[serde(default)]
        pub weather_code: Vec<Option<u16>>,
    }
}

impl Weather {
    /// Map an Open-Meteo forecast onto the canonical schema.
    ///
    /// Fails when the response carries no `current` block.
    pub fn from_open_meteo(response: openmeteo::ForecastResponse) -> Result<Self> {
        let current = response
            .current
            .ok_or_else(|| WeatherWiseError::api(format!("{PROVIDER} response has no current weather")))?;

        let code = current.weather_code;
        let temperature = current.temperature_2m;

        Ok(Self {
            temperature: temperature.round(),
            condition: weather_condition(code).to_string(),
            category: categorize_weather(code, temperature),
            description: weather_description(code).to_string(),
            icon: weather_icon(code),
            hourly: response.hourly.map(|h| HourlyForecast {
                time: h.time,
                temperature_2m: h.temperature_2m,
                precipitation_probability: h.precipitation_probability,
            }),
            daily: response.daily.map(|d| DailyForecast {
                time: d.time,
                temperature_2m_max: d.temperature_2m_max,
                temperature_2m_min: d.temperature_2m_min,
                weather_code: d.weather_code,
            }),
            current: Some(CurrentConditions {
                relative_humidity_2m: current.relative_humidity_2m,
                apparent_temperature: current.apparent_temperature.unwrap_or(temperature).round(),
                wind_speed_10m: current.wind_speed_10m,
                uv_index: 0.0,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherCategory;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> openmeteo::ForecastResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_open_meteo_maps_current_block() {
        let response = parse(json!({
            "current": {
                "temperature_2m": 17.6,
                "relative_humidity_2m": 82.0,
                "apparent_temperature": 16.9,
                "weather_code": 63,
                "wind_speed_10m": 14.2
            },
            "hourly": {
                "time": ["2024-06-15T00:00", "2024-06-15T01:00"],
                "temperature_2m": [15.1, null],
                "precipitation_probability": [80, 75]
            },
            "daily": {
                "time": ["2024-06-15"],
                "weather_code": [63],
                "temperature_2m_max": [19.0],
                "temperature_2m_min": [12.4]
            }
        }));

        let weather = Weather::from_open_meteo(response).unwrap();
        assert_eq!(weather.temperature, 18.0);
        assert_eq!(weather.condition, "Rain");
        assert_eq!(weather.category, WeatherCategory::Rainy);
        assert_eq!(weather.description, "Moderate rain");
        assert_eq!(weather.icon, "63");

        let hourly = weather.hourly.unwrap();
        assert_eq!(hourly.temperature_2m, vec![Some(15.1), None]);
        assert_eq!(hourly.precipitation_probability, vec![Some(80.0), Some(75.0)]);

        let daily = weather.daily.unwrap();
        assert_eq!(daily.weather_code, vec![Some(63)]);

        let current = weather.current.unwrap();
        assert_eq!(current.relative_humidity_2m, 82.0);
        assert_eq!(current.apparent_temperature, 17.0);
        assert_eq!(current.uv_index, 0.0);
    }

    #[test]
    fn test_category_uses_unrounded_temperature() {
        let response = parse(json!({
            "current": { "temperature_2m": 29.6, "weather_code": 0 }
        }));
        let weather = Weather::from_open_meteo(response).unwrap();
        assert_eq!(weather.temperature, 30.0);
        assert_eq!(weather.category, WeatherCategory::Clear);
        assert!(weather.hourly.is_none());
        assert_eq!(weather.current.unwrap().apparent_temperature, 30.0);
    }

    #[test]
    fn test_missing_current_is_api_error() {
        let response = parse(json!({ "hourly": { "time": [] } }));
        let err = Weather::from_open_meteo(response).unwrap_err();
        assert!(matches!(err, WeatherWiseError::Api { .. }));
    }

    #[test]
    fn test_forecast_url() {
        let client = OpenMeteoClient::new(
            reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build(),
            "https://api.open-meteo.com/v1/",
        );
        let url = client.forecast_url(GeoPoint::new(52.52, 13.41));
        assert!(url.starts_with("https://api.open-meteo.com/v1/forecast?latitude=52.52&longitude=13.41"));
        assert!(url.contains("timezone=auto"));
        assert!(url.contains("daily=weather_code,temperature_2m_max,temperature_2m_min"));
    }
}
