//! # Catalog Search with Query Correction
//!
//! A search that finds nothing gets one chance at a model-suggested rewrite.
//! The policy is strictly two-phase:
//!
//! 1. Search with the literal query. Failures and non-empty results are final.
//! 2. On an empty result, ask the model for a corrected query and, if it
//!    offers a different one, search exactly once more on the same page.
//!
//! Correction is best-effort. A missing model client, a missing template, a
//! failed model call or an unusable suggestion all leave the original empty
//! result in place.

use crate::{
    errors::ReelError,
    prompts::{PromptName, PromptStore},
    providers::{
        ai::{AiProvider, ChatRequest},
        catalog::{result_count, CatalogProvider},
    },
    questions::normalize::strip_quotes,
    types::{CorrectionAttempt, SearchQuery},
};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Near-deterministic sampling for query correction.
pub const CORRECTION_TEMPERATURE: f32 = 0.0;

/// A corrected query is a short string; cap the output accordingly.
pub const CORRECTION_MAX_TOKENS: u32 = 64;

/// The final search payload and, when correction was attempted, what the
/// model suggested.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub payload: Value,
    pub correction: Option<CorrectionAttempt>,
}

impl SearchOutcome {
    fn literal(payload: Value) -> Self {
        Self {
            payload,
            correction: None,
        }
    }

    /// The corrected text that the returned payload was searched with, if any.
    pub fn corrected_query(&self) -> Option<&str> {
        self.correction.as_ref()?.corrected.as_deref()
    }
}

/// Searches the catalog, retrying once with a model-corrected query when the
/// literal query returns no results.
pub async fn search_with_correction(
    catalog: &dyn CatalogProvider,
    ai_provider: Option<&dyn AiProvider>,
    prompts: &dyn PromptStore,
    query: &SearchQuery,
) -> Result<SearchOutcome, ReelError> {
    info!(query = %query.text(), page = query.page(), "[search] Searching catalog.");
    let payload = catalog.search(query).await?;

    if result_count(&payload) > 0 {
        return Ok(SearchOutcome::literal(payload));
    }

    let Some(ai_provider) = ai_provider else {
        info!("[search] No results and no model configured; skipping correction.");
        return Ok(SearchOutcome::literal(payload));
    };
    let Some(template) = prompts.template(PromptName::QueryCorrection) else {
        warn!(
            "[search] No results but prompt template '{}' is unavailable; skipping correction.",
            PromptName::QueryCorrection
        );
        return Ok(SearchOutcome::literal(payload));
    };

    let attempt = request_correction(ai_provider, template, query.text()).await;
    let Some(corrected) = attempt.corrected.clone() else {
        info!(query = %query.text(), "[search] Model offered no usable correction.");
        return Ok(SearchOutcome {
            payload,
            correction: Some(attempt),
        });
    };

    info!(original = %query.text(), corrected = %corrected, "[search] Retrying with corrected query.");
    let payload = catalog.search(&query.with_text(corrected)).await?;
    Ok(SearchOutcome {
        payload,
        correction: Some(attempt),
    })
}

/// Asks the model to rewrite `original`. Never fails: a model error is logged
/// and treated as "no correction".
async fn request_correction(
    ai_provider: &dyn AiProvider,
    template: &str,
    original: &str,
) -> CorrectionAttempt {
    let request = ChatRequest::new(
        template,
        original,
        CORRECTION_TEMPERATURE,
        CORRECTION_MAX_TOKENS,
    );
    let corrected = match ai_provider.complete(&request).await {
        Ok(raw) => {
            debug!("<-- Query correction from AI: {}", raw);
            clean_correction(&raw, original)
        }
        Err(e) => {
            warn!("[search] Query correction call failed: {e}");
            None
        }
    };
    CorrectionAttempt {
        original: original.to_string(),
        corrected,
    }
}

/// Takes the first non-empty line of the model output without surrounding
/// quotes. Empty output or the original text itself yields `None`.
fn clean_correction(raw: &str, original: &str) -> Option<String> {
    let candidate = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(strip_quotes)?;
    (!candidate.is_empty() && candidate != original.trim()).then(|| candidate.to_string())
}
