//! Google Time Zone API adapter

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::TimezoneProvider;
use super::http::get_json;
use crate::models::{GeoPoint, TimezoneInfo};
use crate::{Result, WeatherWiseError};

const PROVIDER: &str = "Timezone API";

#[derive(Debug, Clone)]
pub struct GoogleTimezoneClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimezoneResponse {
    status: String,
    error_message: Option<String>,
    time_zone_id: Option<String>,
    #[serde(default)]
    raw_offset: i32,
    #[serde(default)]
    dst_offset: i32,
}

impl GoogleTimezoneClient {
    pub fn new(
        client: ClientWithMiddleware,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TimezoneProvider for GoogleTimezoneClient {
    #[instrument(skip(self, now), fields(lat = point.lat, lng = point.lng))]
    async fn timezone(&self, point: GeoPoint, now: DateTime<Utc>) -> Result<TimezoneInfo> {
        let url = format!(
            "{}/timezone/json?location={}&timestamp={}&key={}",
            self.base_url,
            point.to_query_value(),
            now.timestamp(),
            urlencoding::encode(&self.api_key)
        );
        let response: TimezoneResponse = get_json(&self.client, PROVIDER, &url).await?;
        let info = to_timezone_info(response, now)?;
        debug!(timezone_id = %info.timezone_id, "Resolved timezone");
        Ok(info)
    }
}

fn to_timezone_info(response: TimezoneResponse, now: DateTime<Utc>) -> Result<TimezoneInfo> {
    if response.status != "OK" {
        return Err(WeatherWiseError::api(format!(
            "{PROVIDER} error: {} - {}",
            response.status,
            response.error_message.as_deref().unwrap_or("no error message")
        )));
    }

    let timezone_id = response
        .time_zone_id
        .ok_or_else(|| WeatherWiseError::api(format!("{PROVIDER} response has no timeZoneId")))?;

    let offset = FixedOffset::east_opt(response.raw_offset + response.dst_offset)
        .ok_or_else(|| WeatherWiseError::api(format!("{PROVIDER} returned an invalid offset")))?;

    Ok(TimezoneInfo {
        timezone_id,
        local_time: now
            .with_timezone(&offset)
            .to_rfc3339_opts(SecondsFormat::Secs, false),
    })
}
