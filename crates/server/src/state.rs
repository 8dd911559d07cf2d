//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds the configuration, the
//! prompt templates and the provider clients, making them accessible to all
//! request handlers.

use crate::config::AppConfig;
use reelquest::{
    prompts::{FilePromptStore, PromptStore},
    providers::{
        ai::{AiProvider, OpenAiProvider},
        catalog::{CatalogProvider, TmdbProvider},
    },
};
use std::sync::Arc;
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The catalog client. `None` when no catalog credential is configured.
    pub catalog: Option<Arc<dyn CatalogProvider>>,
    /// The language model client. `None` when no model credential is configured.
    pub ai_provider: Option<Arc<dyn AiProvider>>,
    /// Prompt templates, read once at startup.
    pub prompts: Arc<dyn PromptStore>,
}

/// Builds the shared application state from the configuration.
///
/// Missing credentials do not stop the server; the affected endpoints report
/// the missing configuration per request instead.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let catalog: Option<Arc<dyn CatalogProvider>> = match &config.tmdb_api_key {
        Some(api_key) => Some(Arc::new(TmdbProvider::new(
            config.catalog.api_url.clone(),
            api_key.clone(),
            config.catalog.language.clone(),
        )?)),
        None => {
            warn!("TMDB_API_KEY is not set; catalog search is disabled.");
            None
        }
    };

    let ai_provider: Option<Arc<dyn AiProvider>> = match &config.openai_api_key {
        Some(api_key) => Some(Arc::new(OpenAiProvider::new(
            config.model.api_url.clone(),
            api_key.clone(),
            config.model.model_name.clone(),
        )?)),
        None => {
            warn!("OPENAI_API_KEY is not set; question generation and query correction are disabled.");
            None
        }
    };

    let prompts = FilePromptStore::load(&config.prompts_dir);
    info!(prompts_dir = %config.prompts_dir, "Loaded prompt templates.");

    Ok(AppState {
        config: Arc::new(config),
        catalog,
        ai_provider,
        prompts: Arc::new(prompts),
    })
}
