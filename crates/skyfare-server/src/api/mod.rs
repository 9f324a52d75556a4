mod destinations;
mod flights;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use skyfare_amadeus::{AmadeusClient, AmadeusError, ClientCredentials, Credentials};
use skyfare_core::AppConfig;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub amadeus: AmadeusClient,
    pub credentials: ClientCredentials,
    pub search_max_results: u32,
}

impl AppState {
    /// Builds the shared upstream client and credential provider from config.
    ///
    /// # Errors
    ///
    /// Returns [`AmadeusError`] if the HTTP client cannot be built or the
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, AmadeusError> {
        let amadeus = AmadeusClient::with_base_url(
            config.upstream_timeout_secs,
            &config.user_agent,
            &config.amadeus_base_url,
        )?;
        let credentials = ClientCredentials::new(
            amadeus.clone(),
            Credentials {
                client_id: config.amadeus_api_key.clone(),
                client_secret: config.amadeus_api_secret.clone(),
            },
        );

        Ok(Self {
            amadeus,
            credentials,
            search_max_results: config.search_max_results,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "bad_gateway" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Classifies an upstream failure into a request-level error.
pub(super) fn map_amadeus_error(request_id: String, error: &AmadeusError) -> ApiError {
    match error {
        AmadeusError::Auth { .. } => {
            tracing::error!(error = %error, "amadeus rejected client credentials");
            ApiError::new(request_id, "unauthorized", "upstream authentication failed")
        }
        AmadeusError::UpstreamStatus { message, .. } => {
            tracing::warn!(error = %error, "amadeus returned an error status");
            ApiError::new(request_id, "bad_gateway", message.clone())
        }
        AmadeusError::Http(_) => {
            tracing::warn!(error = %error, "amadeus request failed");
            ApiError::new(request_id, "bad_gateway", "upstream request failed")
        }
        AmadeusError::Deserialize { .. } | AmadeusError::InvalidBaseUrl(_) => {
            tracing::error!(error = %error, "amadeus response could not be handled");
            ApiError::new(request_id, "internal_error", "failed to process upstream response")
        }
    }
}

/// Validates a three-letter IATA code and returns it upper-cased.
pub(super) fn normalize_iata(
    request_id: &str,
    field: &str,
    raw: &str,
) -> Result<String, ApiError> {
    if raw.len() == 3 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
        return Ok(raw.to_ascii_uppercase());
    }
    Err(ApiError::new(
        request_id,
        "validation_error",
        format!("{field} must be a three-letter IATA code, got \"{raw}\""),
    ))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/flights/{origin}/{destination}",
            get(flights::search_flights),
        )
        .route(
            "/api/v1/destinations/{origin}",
            get(destinations::search_destinations),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
