//! Discovery ranking engine
//!
//! The pure core (`distance`, `classifier`, `open_status`, `ranking`) does no
//! I/O; `service` wires it to the providers.

pub mod classifier;
pub mod distance;
pub mod open_status;
pub mod ranking;
pub mod service;

pub use classifier::{PlaceCategory, classify, is_indoor_place, is_outdoor_place};
pub use distance::{distance_km, format_distance};
pub use open_status::{LocalClock, is_open, is_open_at, open_status_text};
pub use ranking::{RankingInput, rank_places, rank_places_at, score_place, weather_match_score};
pub use service::{DiscoveryResponse, DiscoveryService};
