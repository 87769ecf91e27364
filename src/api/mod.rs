use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::WeatherWiseError;
use crate::discovery::{DiscoveryResponse, DiscoveryService};
use crate::models::{GeoPoint, GeocodeResult, Prediction, ReverseGeocodeResult};
use crate::providers::{GeocodingProvider, Providers};

const MIN_AUTOCOMPLETE_INPUT: usize = 2;

#[derive(Clone)]
pub struct AppState {
    pub discovery: DiscoveryService,
    pub geocoding: Arc<dyn GeocodingProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(providers: &Providers, search_radius_m: u32) -> Self {
        Self {
            discovery: DiscoveryService::from_providers(providers, search_radius_m),
            geocoding: Arc::clone(&providers.geocoding),
        }
    }
}

/// JSON error body: `{ "error": ..., "details"?: ... }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    /// 500 with the underlying error as `details`
    pub fn internal(error: impl Into<String>, source: &WeatherWiseError) -> Self {
        let mut api_error = Self::new(StatusCode::INTERNAL_SERVER_ERROR, error);
        api_error.body.details = Some(source.to_string());
        api_error
    }

    /// Map a library error: validation → 400, not found → 404, else 500
    pub fn from_error(context: &str, err: &WeatherWiseError) -> Self {
        match err {
            WeatherWiseError::Validation { .. } => Self::bad_request(err.user_message()),
            WeatherWiseError::NotFound { message } => Self::not_found(message.clone()),
            _ => {
                error!(error = %err, "{context}");
                Self::internal(context, err)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/discover", get(discover))
        .route("/api/geocode", post(geocode))
        .route("/api/reverse-geocode", get(reverse_geocode))
        .route("/api/autocomplete", get(autocomplete))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct DiscoverParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoordinateParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub predictions: Vec<Prediction>,
}

/// Parse and range-check query-string coordinates
fn parse_coordinates(lat: Option<&str>, lng: Option<&str>) -> Option<GeoPoint> {
    let lat = lat?.trim().parse::<f64>().ok()?;
    let lng = lng?.trim().parse::<f64>().ok()?;
    GeoPoint::validated(lat, lng).ok()
}

async fn discover(
    State(state): State<AppState>,
    Query(params): Query<DiscoverParams>,
) -> Result<Json<DiscoveryResponse>, ApiError> {
    let point = parse_coordinates(params.lat.as_deref(), params.lng.as_deref()).ok_or_else(
        || ApiError::bad_request("Invalid coordinates or query. Required: lat, lng"),
    )?;

    state
        .discovery
        .discover(point.lat, point.lng, params.q.as_deref())
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, "Discovery failed");
            ApiError::internal("Failed to fetch recommendations", &e)
        })
}

async fn geocode(
    State(state): State<AppState>,
    payload: Result<Json<GeocodeRequest>, JsonRejection>,
) -> Result<Json<GeocodeResult>, ApiError> {
    let query = payload
        .ok()
        .and_then(|Json(body)| body.query)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Query is required"))?;

    state
        .geocoding
        .geocode(&query)
        .await
        .map_err(|e| ApiError::from_error("Failed to search location", &e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No results found"))
}

async fn reverse_geocode(
    State(state): State<AppState>,
    Query(params): Query<CoordinateParams>,
) -> Result<Json<ReverseGeocodeResult>, ApiError> {
    let point = parse_coordinates(params.lat.as_deref(), params.lng.as_deref())
        .ok_or_else(|| ApiError::bad_request("Invalid coordinates"))?;

    state
        .geocoding
        .reverse_geocode(point)
        .await
        .map_err(|e| ApiError::from_error("Failed to reverse geocode", &e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No location found"))
}

async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let input = params
        .input
        .filter(|input| input.chars().count() >= MIN_AUTOCOMPLETE_INPUT)
        .ok_or_else(|| ApiError::bad_request("input is required"))?;

    let predictions = state
        .geocoding
        .autocomplete(&input)
        .await
        .map_err(|e| ApiError::from_error("Failed to fetch suggestions", &e))?;

    Ok(Json(AutocompleteResponse { predictions }))
}
