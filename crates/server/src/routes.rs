use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use patata_vision::FoodDetector;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub food: Arc<FoodDetector>,
}

#[derive(Debug, Deserialize)]
pub struct DetectFoodRequest {
    /// Base64 image content, optionally as a `data:` URL.
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetectFoodResponse {
    pub food_labels: Vec<String>,
}

pub fn router(state: AppState, cors: CorsLayer, body_limit: usize) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        info_span!("http_request", method = ?request.method(), uri = %request.uri())
    });

    Router::new()
        .route("/detectFood", post(detect_food))
        .route("/health", get(health))
        // The tower-http limit replaces axum's 2 MB default so large photos fit.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(trace_layer)
        .with_state(state)
}

/// Any origin when `origins` is empty, otherwise only the listed ones.
pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    if origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let allowed = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    tracing::debug!(?allowed, "allowed origins");

    Ok(CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}

async fn detect_food(
    State(state): State<AppState>,
    payload: Result<Json<DetectFoodRequest>, JsonRejection>,
) -> Result<Json<DetectFoodResponse>, ApiError> {
    let Json(request) = payload?;

    match state.food.detect_food(&request.image).await {
        Ok(detection) => {
            tracing::info!(food_labels = ?detection.food_labels, "food detected");
            Ok(Json(DetectFoodResponse { food_labels: detection.food_labels }))
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!(error = %e, "rejected image payload");
            Err(ApiError::bad_request(e.to_string()))
        }
        Err(e) => {
            tracing::error!(error = %e, "food detection failed");
            Err(ApiError::Processing)
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
