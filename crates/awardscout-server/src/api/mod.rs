mod analysis;

use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use awardscout_core::AwardCatalog;
use awardscout_insight::{GeminiClient, GenerativeModel, InsightError};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<GeminiClient>,
    pub catalog: Arc<AwardCatalog>,
}

/// Error body for every non-2xx response: `{ code, message, requestId }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub request_id: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct HealthData {
    status: &'static str,
    ai_configured: bool,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            request_id: request_id.into(),
        }
    }

    pub fn from_insight(request_id: impl Into<String>, error: &InsightError) -> Self {
        let request_id = request_id.into();
        match error {
            InsightError::AwardNotFound(_) => {
                tracing::debug!(request_id = %request_id, error = %error, "award not found");
            }
            _ => tracing::warn!(
                request_id = %request_id,
                kind = error.kind(),
                error = %error,
                "chance analysis failed"
            ),
        }
        Self::new(request_id, error.kind(), error.to_string())
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "bad_request" | "invalid_profile" => StatusCode::BAD_REQUEST,
            "award_not_found" => StatusCode::NOT_FOUND,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "configuration_error" => StatusCode::SERVICE_UNAVAILABLE,
            "upstream_error" | "parse_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn ai_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/analyze-chance", post(analysis::analyze_chance))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(ai_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        ai_configured: state.model.is_configured(),
    })
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(30, Duration::from_secs(60))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
