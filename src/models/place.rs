//! Place and opening-hours models, plus the scored output of a ranking pass
//!
//! The JSON shape (camelCase) is the one served by `/api/discover`.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Point in the weekly schedule
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DayTime {
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub day: u8,
    /// Hour, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
}

impl DayTime {
    #[must_use]
    pub const fn new(day: u8, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    /// Minutes since local midnight
    #[must_use]
    pub fn minutes_of_day(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

/// One continuous open interval.
///
/// A close time-of-day earlier than the open time-of-day means the interval
/// runs past midnight into the following day.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct OpeningPeriod {
    pub open: DayTime,
    pub close: DayTime,
}

impl OpeningPeriod {
    /// Whether the close time-of-day wraps past midnight
    #[must_use]
    pub fn crosses_midnight(&self) -> bool {
        self.close.minutes_of_day() < self.open.minutes_of_day()
    }
}

/// Opening schedule as reported by the places provider
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    /// Provider-computed open flag; authoritative when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<OpeningPeriod>>,
}

/// Candidate point of interest
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    /// Provider category tags, e.g. `["cafe", "food"]`
    #[serde(default)]
    pub types: Vec<String>,
    pub location: GeoPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    /// Average rating, 0-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps_url: Option<String>,
}

impl Place {
    /// Minimal place, mostly useful for tests and fixtures
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            types: Vec::new(),
            location,
            opening_hours: None,
            rating: None,
            vicinity: None,
            photo_url: None,
            google_maps_url: None,
        }
    }

    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    #[must_use]
    pub fn with_opening_hours(mut self, hours: OpeningHours) -> Self {
        self.opening_hours = Some(hours);
        self
    }
}

/// A place after one ranking pass
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPlace {
    #[serde(flatten)]
    pub place: Place,
    pub score: i64,
    /// Distance from the user in kilometers
    pub distance: f64,
    pub is_open: bool,
    pub explanation: String,
}
