//! Canonical weather schema and WMO weather-code interpretation
//!
//! Every weather provider maps its payload into [`Weather`]; the ranking
//! engine only ever looks at [`Weather::category`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::WeatherWiseError;

/// Coarse weather bucket used to bias recommendations
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    Rainy,
    Hot,
    Cold,
    Clear,
}

impl WeatherCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Rainy => "rainy",
            WeatherCategory::Hot => "hot",
            WeatherCategory::Cold => "cold",
            WeatherCategory::Clear => "clear",
        }
    }

    pub const fn all() -> &'static [WeatherCategory] {
        &[
            WeatherCategory::Rainy,
            WeatherCategory::Hot,
            WeatherCategory::Cold,
            WeatherCategory::Clear,
        ]
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WeatherCategory::Rainy => "🌧️",
            WeatherCategory::Hot => "☀️",
            WeatherCategory::Cold => "❄️",
            WeatherCategory::Clear => "🌤️",
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherCategory {
    type Err = WeatherWiseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "rainy" => Ok(WeatherCategory::Rainy),
            "hot" => Ok(WeatherCategory::Hot),
            "cold" => Ok(WeatherCategory::Cold),
            "clear" => Ok(WeatherCategory::Clear),
            _ => Err(WeatherWiseError::validation(format!(
                "Unknown weather category '{value}'. Expected one of: rainy, hot, cold, clear"
            ))),
        }
    }
}

/// Current weather plus short-range forecast, provider independent
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    /// Temperature in Celsius, rounded
    pub temperature: f64,
    /// Short condition label, e.g. "Cloudy"
    pub condition: String,
    pub category: WeatherCategory,
    pub description: String,
    /// Icon key; the WMO code as a string
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<HourlyForecast>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily: Option<DailyForecast>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentConditions>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub weather_code: Vec<Option<u16>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub relative_humidity_2m: f64,
    pub apparent_temperature: f64,
    pub wind_speed_10m: f64,
    pub uv_index: f64,
}

/// Map a WMO weather code and temperature to a [`WeatherCategory`].
///
/// Precipitation wins over temperature; snow counts as cold.
#[must_use]
pub fn categorize_weather(code: u16, temperature: f64) -> WeatherCategory {
    match code {
        51..=67 | 80..=82 | 95..=99 => return WeatherCategory::Rainy,
        71..=77 | 85..=86 => return WeatherCategory::Cold,
        _ => {}
    }

    if temperature >= 30.0 {
        WeatherCategory::Hot
    } else if temperature <= 10.0 {
        WeatherCategory::Cold
    } else {
        WeatherCategory::Clear
    }
}

/// Short condition label for a WMO code
#[must_use]
pub fn weather_condition(code: u16) -> &'static str {
    match code {
        0 => "Clear",
        1..=3 => "Cloudy",
        45..=48 => "Fog",
        51..=57 => "Drizzle",
        61..=67 => "Rain",
        71..=77 => "Snow",
        80..=82 => "Showers",
        85..=86 => "Snow Showers",
        95..=99 => "Thunderstorm",
        _ => "Unknown",
    }
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_description(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// Icon key for a WMO code; the frontend serves `/icons/{code}.png`
#[must_use]
pub fn weather_icon(code: u16) -> String {
    code.to_string()
}
