//! Data models for the WeatherWise backend
//!
//! This module contains the domain models organized by concern:
//! - Location: geographic coordinates
//! - Place: points of interest, opening hours and scored results
//! - Weather: canonical weather schema and WMO code interpretation
//! - Timezone / Geocoding: lookup results served by the API

pub mod geocoding;
pub mod location;
pub mod place;
pub mod timezone;
pub mod weather;

// Re-export all public types for convenient access
pub use geocoding::{GeocodeResult, Prediction, ReverseGeocodeResult};
pub use location::GeoPoint;
pub use place::{DayTime, OpeningHours, OpeningPeriod, Place, ScoredPlace};
pub use timezone::TimezoneInfo;
pub use weather::{CurrentConditions, DailyForecast, HourlyForecast, Weather, WeatherCategory};
