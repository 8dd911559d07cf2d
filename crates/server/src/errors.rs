use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reelquest::{ReelError, UpstreamService};
use serde_json::{json, Value};
use tracing::error;

/// The error message used when the model failure payload carries none.
const DEFAULT_MODEL_ERROR: &str = "OpenAI API error";

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors originating from the `reelquest` library.
    Reel(ReelError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `ReelError` to `AppError`.
impl From<ReelError> for AppError {
    fn from(err: ReelError) -> Self {
        AppError::Reel(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

/// Maps a status code received from a remote service onto our response.
fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Picks the provider's own message out of an OpenAI-style error payload.
fn model_error_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_MODEL_ERROR)
        .to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::Reel(err) => {
                // Log the original error for debugging purposes
                error!("ReelError: {:?}", err);
                match err {
                    ReelError::MissingConfiguration(msg) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
                    }
                    ReelError::Validation(msg) => {
                        (StatusCode::BAD_REQUEST, json!({ "error": msg }))
                    }
                    // Catalog failures are relayed as-is.
                    ReelError::Upstream {
                        service: UpstreamService::Catalog,
                        status,
                        body,
                    } => (upstream_status(status), body),
                    ReelError::Upstream {
                        service: UpstreamService::Model,
                        status,
                        body,
                    } => (
                        upstream_status(status),
                        json!({ "error": model_error_message(&body), "details": body }),
                    ),
                    ReelError::Request { service, source } => (
                        StatusCode::BAD_GATEWAY,
                        json!({ "error": format!("Request to {service} service failed: {source}") }),
                    ),
                    ReelError::Deserialization { service, source } => (
                        StatusCode::BAD_GATEWAY,
                        json!({
                            "error": format!("Failed to deserialize {service} service response: {source}")
                        }),
                    ),
                    ReelError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": format!("Failed to build HTTP client: {e}") }),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred." }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
