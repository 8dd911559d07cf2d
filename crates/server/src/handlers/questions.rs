//! # Question Generation Route Handlers
//!
//! Both endpoints run the same pipeline. They differ in what they accept and
//! in how the questions are serialized:
//!
//! - `POST /api/generate-questions` ignores history and answers with the
//!   legacy view, where a question without options is a bare string.
//! - `POST /api/generate-questions/extended` reads `existingQA` and answers
//!   with uniform `{ "q", "options"? }` records.
//!
//! Request bodies are taken as raw JSON and an absent or malformed body is
//! read as `null`, so a missing or non-string `overview` always becomes a
//! 400 with a message, and only after the model credential was checked.

use super::{AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use reelquest::{
    generate_questions, providers::ai::AiProvider, GenerationRequest, QaPair, Question,
    QuestionRecord, ReelError,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

// --- API Payloads for Question Generation ---

#[derive(Serialize)]
pub struct GenerateQuestionsResponse<T> {
    pub questions: Vec<T>,
}

fn require_model(app_state: &AppState) -> Result<&dyn AiProvider, ReelError> {
    app_state.ai_provider.as_deref().ok_or_else(|| {
        ReelError::MissingConfiguration("OPENAI_API_KEY is not set in .env".to_string())
    })
}

/// Reads `existingQA`, keeping only entries with a string `q`.
fn parse_history(payload: &Value) -> Vec<QaPair> {
    payload
        .get("existingQA")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(QaPair::from_value).collect())
        .unwrap_or_default()
}

/// Builds a generation request out of a raw body. Non-string `title` and
/// `overview` values are treated as absent.
fn parse_request(payload: &Value, with_history: bool) -> Result<GenerationRequest, ReelError> {
    let title = payload.get("title").and_then(Value::as_str);
    let overview = payload
        .get("overview")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let history = if with_history {
        parse_history(payload)
    } else {
        Vec::new()
    };
    GenerationRequest::new(title, overview, history)
}

/// Falls back to `null` when the body is missing, not JSON, or sent without
/// a JSON content type.
fn body_or_null(payload: Result<Json<Value>, JsonRejection>) -> Value {
    match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!("Unreadable request body treated as empty: {rejection}");
            Value::Null
        }
    }
}

async fn run_generation(
    app_state: &AppState,
    payload: &Value,
    with_history: bool,
) -> Result<Vec<Question>, AppError> {
    let ai_provider = require_model(app_state)?;
    let request = parse_request(payload, with_history)?;
    info!(
        title = request.title().unwrap_or("-"),
        history = request.history().len(),
        "Received question generation request."
    );

    let questions = generate_questions(ai_provider, app_state.prompts.as_ref(), &request).await?;
    info!(count = questions.len(), "Generated questions.");
    Ok(questions)
}

/// Handler for `POST /api/generate-questions`.
pub async fn generate_questions_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateQuestionsResponse<Question>>, AppError> {
    let payload = body_or_null(payload);
    let questions = run_generation(&app_state, &payload, false).await?;
    Ok(Json(GenerateQuestionsResponse { questions }))
}

/// Handler for `POST /api/generate-questions/extended`.
pub async fn generate_questions_extended_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateQuestionsResponse<QuestionRecord>>, AppError> {
    let payload = body_or_null(payload);
    let questions = run_generation(&app_state, &payload, true)
        .await?
        .into_iter()
        .map(QuestionRecord::from)
        .collect();
    Ok(Json(GenerateQuestionsResponse { questions }))
}
