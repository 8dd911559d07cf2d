use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/config", get(handlers::public_config_handler))
        .route("/api/tmdb/search", get(handlers::tmdb_search_handler))
        .route(
            "/api/generate-questions",
            post(handlers::generate_questions_handler),
        )
        .route(
            "/api/generate-questions/extended",
            post(handlers::generate_questions_extended_handler),
        )
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
