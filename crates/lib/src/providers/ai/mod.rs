pub mod openai;

use crate::errors::ReelError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub use openai::OpenAiProvider;

/// A single chat message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chat-completion request. The model id is owned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// The common two-message shape: one system instruction, one user turn.
    pub fn new(system: &str, user: &str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature,
            max_tokens,
        }
    }
}

/// A trait for interacting with a language-model provider.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends the request and returns the text of the first choice, trimmed.
    /// A response with no content yields an empty string.
    async fn complete(&self, request: &ChatRequest) -> Result<String, ReelError>;
}

dyn_clone::clone_trait_object!(AiProvider);
