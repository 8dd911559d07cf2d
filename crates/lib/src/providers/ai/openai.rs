use crate::{
    errors::{ReelError, UpstreamService},
    providers::ai::{AiProvider, ChatMessage, ChatRequest},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize, Debug)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize, Debug)]
struct CompletionMessage {
    content: Option<String>,
}

// --- Provider implementation ---

/// A provider for an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider`.
    pub fn new(api_url: String, api_key: String, model: String) -> Result<Self, ReelError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(ReelError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ReelError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };
        debug!(model = %self.model, temperature = request.temperature, max_tokens = request.max_tokens, "--> Sending chat completion request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| ReelError::Request {
                service: UpstreamService::Model,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ReelError::upstream(
                UpstreamService::Model,
                status.as_u16(),
                &error_text,
            ));
        }

        let completion: CompletionResponse =
            response
                .json()
                .await
                .map_err(|source| ReelError::Deserialization {
                    service: UpstreamService::Model,
                    source,
                })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        debug!("<-- Chat completion content: {}", content);
        Ok(content)
    }
}
