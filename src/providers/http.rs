//! Shared HTTP client with transient-error retries

use std::time::{Duration, Instant};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::config::HttpConfig;
use crate::{Result, WeatherWiseError};

const USER_AGENT: &str = concat!("WeatherWise/", env!("CARGO_PKG_VERSION"));

/// Build the client every provider shares
pub fn build_client(config: &HttpConfig) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| WeatherWiseError::config(format!("Failed to create HTTP client: {e}")))?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Drop the `key=` query parameter so URLs can be logged
pub(crate) fn redact(url: &str) -> &str {
    url.split("key=").next().unwrap_or(url)
}

/// GET `url` and decode a JSON body, mapping non-2xx statuses to API errors
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &ClientWithMiddleware,
    provider: &str,
    url: &str,
) -> Result<T> {
    let start = Instant::now();
    debug!(provider, url = redact(url), "Sending request");

    let response = client.get(url).send().await.map_err(|e| {
        error!(provider, "Request failed: {}", e);
        e
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(provider, %status, "Provider returned an error status");
        return Err(WeatherWiseError::api(format!(
            "{provider} error: {} - {body}",
            status.as_u16()
        )));
    }

    let value = response.json::<T>().await?;
    let elapsed = start.elapsed();

    info!(provider, "Request completed in {:.3}s", elapsed.as_secs_f64());
    if elapsed.as_secs() > 5 {
        warn!(provider, "Slow API response detected: {:.3}s", elapsed.as_secs_f64());
    }

    Ok(value)
}
