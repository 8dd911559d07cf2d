use async_trait::async_trait;
use reelquest::errors::{ReelError, UpstreamService};
use reelquest::prompts::{InMemoryPromptStore, PromptName};
use reelquest::providers::ai::{AiProvider, ChatRequest};
use reelquest::providers::catalog::CatalogProvider;
use reelquest::types::SearchQuery;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

/// The question-generation template used by test prompt stores.
pub const TEST_GENERATION_PROMPT: &str = "You write reflection questions. Reply with a JSON array.";

/// The query-correction template used by test prompt stores.
pub const TEST_CORRECTION_PROMPT: &str = "You fix misspelled media titles. Reply with the title only.";

/// A prompt store holding both test templates.
pub fn test_prompt_store() -> InMemoryPromptStore {
    InMemoryPromptStore::new()
        .with(PromptName::QuestionGeneration, TEST_GENERATION_PROMPT)
        .with(PromptName::QueryCorrection, TEST_CORRECTION_PROMPT)
}

/// A TMDB-shaped search payload with the given titles as results.
pub fn search_payload(titles: &[&str]) -> Value {
    let results: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| json!({ "id": i + 1, "media_type": "tv", "name": title }))
        .collect();
    json!({
        "page": 1,
        "results": results,
        "total_pages": 1,
        "total_results": titles.len(),
    })
}

// --- Mock AI Provider ---

type ScriptedReply = Result<String, (u16, Value)>;

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, ScriptedReply>>>,
    calls: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), Ok(response.to_string()));
    }

    /// Pre-programs an upstream failure for a specific prompt.
    pub fn add_error(&self, key: &str, status: u16, body: Value) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), Err((status, body)));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ReelError> {
        self.calls.lock().unwrap().push(request.clone());

        let system_prompt = request
            .messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let responses = self.responses.lock().unwrap();
        for (key, reply) in responses.iter() {
            if system_prompt.contains(key) {
                return match reply {
                    Ok(text) => Ok(text.trim().to_string()),
                    Err((status, body)) => Err(ReelError::Upstream {
                        service: UpstreamService::Model,
                        status: *status,
                        body: body.clone(),
                    }),
                };
            }
        }

        Err(ReelError::Upstream {
            service: UpstreamService::Model,
            status: 500,
            body: json!({
                "error": format!("MockAiProvider: No response programmed for system prompt. Got: '{system_prompt}'")
            }),
        })
    }
}

// --- Mock Catalog Provider ---

/// A catalog that answers from a table keyed by exact query text. Unknown
/// queries return an empty result page.
#[derive(Clone, Debug, Default)]
pub struct MockCatalogProvider {
    responses: Arc<Mutex<HashMap<String, Result<Value, (u16, Value)>>>>,
    calls: Arc<Mutex<Vec<SearchQuery>>>,
}

impl MockCatalogProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_results(&self, query: &str, payload: Value) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(query.to_string(), Ok(payload));
    }

    pub fn add_error(&self, query: &str, status: u16, body: Value) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(query.to_string(), Err((status, body)));
    }

    /// Every query searched so far, in order.
    pub fn get_calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogProvider for MockCatalogProvider {
    async fn search(&self, query: &SearchQuery) -> Result<Value, ReelError> {
        self.calls.lock().unwrap().push(query.clone());

        let responses = self.responses.lock().unwrap();
        match responses.get(query.text()) {
            Some(Ok(payload)) => Ok(payload.clone()),
            Some(Err((status, body))) => Err(ReelError::Upstream {
                service: UpstreamService::Catalog,
                status: *status,
                body: body.clone(),
            }),
            None => Ok(search_payload(&[])),
        }
    }
}
