//! # reelquest
//!
//! Content discovery and reflection-question generation for media titles.
//!
//! The crate has two request-scoped pipelines:
//!
//! - [`search::search_with_correction`] runs a catalog search and, when the
//!   literal query finds nothing, asks the language model for a corrected
//!   query and searches exactly once more.
//! - [`questions::generate_questions`] builds a prompt from a title, its
//!   synopsis and prior Q&A history, calls the language model, and normalizes
//!   whatever text comes back into at most five [`Question`]s.
//!
//! Remote services sit behind the [`providers::ai::AiProvider`] and
//! [`providers::catalog::CatalogProvider`] traits; prompt templates come from
//! a [`prompts::PromptStore`].

pub mod errors;
pub mod prompts;
pub mod providers;
pub mod questions;
pub mod search;
pub mod types;

pub use errors::{ReelError, UpstreamService};
pub use questions::{generate_questions, normalize_response, Question, QuestionRecord};
pub use search::{search_with_correction, SearchOutcome};
pub use types::{CorrectionAttempt, GenerationRequest, QaPair, SearchQuery, MAX_HISTORY};
