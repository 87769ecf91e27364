//! Error types and handling for the `WeatherWise` backend

use thiserror::Error;

/// Main error type for the `WeatherWise` library
#[derive(Error, Debug)]
pub enum WeatherWiseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream provider answered, but with an error status or unusable payload
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Lookup produced no result
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Transport failure after the retry policy gave up
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Response body could not be read or decoded
    #[error("Decode error: {source}")]
    Decode {
        #[from]
        source: reqwest::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl WeatherWiseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherWiseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            WeatherWiseError::Api { .. }
            | WeatherWiseError::Http { .. }
            | WeatherWiseError::Decode { .. } => {
                "Unable to reach an external service. Please try again shortly.".to_string()
            }
            WeatherWiseError::Validation { message } => format!("Invalid input: {message}"),
            WeatherWiseError::NotFound { message } => message.clone(),
            WeatherWiseError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WeatherWiseError::config("missing API key");
        assert!(matches!(config_err, WeatherWiseError::Config { .. }));

        let api_err = WeatherWiseError::api("REQUEST_DENIED");
        assert!(matches!(api_err, WeatherWiseError::Api { .. }));

        let validation_err = WeatherWiseError::validation("invalid coordinates");
        assert!(matches!(validation_err, WeatherWiseError::Validation { .. }));

        let not_found = WeatherWiseError::not_found("No results found");
        assert!(matches!(not_found, WeatherWiseError::NotFound { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = WeatherWiseError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = WeatherWiseError::api("test");
        assert!(api_err.user_message().contains("external service"));

        let validation_err = WeatherWiseError::validation("latitude out of range");
        assert!(validation_err.user_message().contains("latitude out of range"));

        let not_found = WeatherWiseError::not_found("No location found");
        assert_eq!(not_found.user_message(), "No location found");
    }

    #[test]
    fn test_display_includes_message() {
        let err = WeatherWiseError::api("Places API error: OVER_QUERY_LIMIT");
        assert_eq!(err.to_string(), "API error: Places API error: OVER_QUERY_LIMIT");
    }
}
