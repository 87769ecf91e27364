//! `WeatherWise` - weather-aware discovery of nearby places
//!
//! This library ranks nearby points of interest by how well they suit the
//! current weather, and serves the ranking over a small JSON API.

pub mod api;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod web;

// Re-export core types for public API
pub use config::WeatherWiseConfig;
pub use discovery::{DiscoveryResponse, DiscoveryService, RankingInput, rank_places};
pub use error::WeatherWiseError;
pub use models::{GeoPoint, OpeningHours, Place, ScoredPlace, Weather, WeatherCategory};
pub use providers::Providers;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherWiseError>;
