//! # General Route Handlers
//!
//! The root, health check and public client configuration endpoints.

use super::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Client-side settings that are safe to expose to browsers.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfigResponse {
    pub kakao_js_key: String,
}

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "reelquest server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for `GET /api/config`. An unset key is sent as an empty string.
pub async fn public_config_handler(
    State(app_state): State<AppState>,
) -> Json<PublicConfigResponse> {
    Json(PublicConfigResponse {
        kakao_js_key: app_state.config.kakao_js_key.clone().unwrap_or_default(),
    })
}
