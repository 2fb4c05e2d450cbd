use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// The only message clients see for upstream failures.
pub const PROCESSING_FAILURE: &str = "Error al procesar la imagen";

#[derive(Debug)]
pub enum ApiError {
    /// The request itself is unusable; the message is safe to return.
    Invalid { status: StatusCode, message: String },
    /// Anything that went wrong after the request was accepted.
    Processing,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Invalid { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::Invalid { status, message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid { status, message } => {
                (status, Json(ErrorBody { error: &message })).into_response()
            }
            ApiError::Processing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { error: PROCESSING_FAILURE }),
            )
                .into_response(),
        }
    }
}
