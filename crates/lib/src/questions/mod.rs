//! # Question Generation
//!
//! Turns a title and synopsis into a short list of reflection questions:
//! [`context`] assembles the prompt, [`generate`] calls the model, and
//! [`normalize`] converts the model's free text into validated [`Question`]s.

pub mod context;
pub mod generate;
pub mod normalize;

use serde::{Deserialize, Serialize};

pub use context::{build_prompt, ChatPrompt};
pub use generate::{generate_questions, GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE};
pub use normalize::{normalize_response, strip_fences};

/// Upper bound on questions returned for one request.
pub const MAX_QUESTIONS: usize = 5;

/// Upper bound on answer options attached to one question.
pub const MAX_OPTIONS: usize = 10;

/// A generated question.
///
/// Serializes in the legacy shape: a plain question is a bare string, a
/// question with options is a `{ "q", "options" }` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Question {
    Plain(String),
    WithOptions { q: String, options: Vec<String> },
}

impl Question {
    /// Builds a question, downgrading to [`Question::Plain`] when there are no
    /// options.
    pub fn new(text: impl Into<String>, options: Vec<String>) -> Self {
        if options.is_empty() {
            Question::Plain(text.into())
        } else {
            Question::WithOptions {
                q: text.into(),
                options,
            }
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Question::Plain(text) => text,
            Question::WithOptions { q, .. } => q,
        }
    }

    /// The answer options, or an empty slice for a plain question.
    pub fn options(&self) -> &[String] {
        match self {
            Question::Plain(_) => &[],
            Question::WithOptions { options, .. } => options,
        }
    }
}

/// The object-shaped view of a [`Question`] used by the extended endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub q: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        match question {
            Question::Plain(q) => QuestionRecord { q, options: None },
            Question::WithOptions { q, options } => QuestionRecord {
                q,
                options: Some(options),
            },
        }
    }
}
