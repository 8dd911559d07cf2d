//! # Search Route Handlers

use super::{AppError, AppState};
use axum::{
    extract::{Query, State},
    Json,
};
use reelquest::{search_with_correction, ReelError, SearchQuery};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

// --- API Payloads for Search ---

/// Query string of `GET /api/tmdb/search`. Both fields are kept raw so that
/// a missing query and a malformed page are handled here instead of being
/// rejected by the extractor.
#[derive(Deserialize)]
pub struct TmdbSearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
}

/// Handler for `GET /api/tmdb/search`.
///
/// Returns the catalog payload unchanged. When the literal query finds
/// nothing, one model-corrected retry is made before answering.
pub async fn tmdb_search_handler(
    State(app_state): State<AppState>,
    Query(params): Query<TmdbSearchParams>,
) -> Result<Json<Value>, AppError> {
    let catalog = app_state.catalog.as_deref().ok_or_else(|| {
        ReelError::MissingConfiguration("TMDB_API_KEY is not set in .env".to_string())
    })?;

    let page = SearchQuery::parse_page(params.page.as_deref());
    let query = SearchQuery::new(params.q.as_deref().unwrap_or_default(), page)?;
    info!("Received catalog search for query: '{}'", query.text());

    let outcome = search_with_correction(
        catalog,
        app_state.ai_provider.as_deref(),
        app_state.prompts.as_ref(),
        &query,
    )
    .await?;

    if let Some(corrected) = outcome.corrected_query() {
        info!(original = %query.text(), corrected = %corrected, "Answered with a corrected query.");
    }

    Ok(Json(outcome.payload))
}
