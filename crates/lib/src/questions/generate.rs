use super::{build_prompt, normalize_response, Question};
use crate::{
    errors::ReelError,
    prompts::{PromptName, PromptStore},
    providers::ai::{AiProvider, ChatRequest},
    types::GenerationRequest,
};
use tracing::{debug, info};

/// Sampling temperature for question generation; leaves room for some lexical
/// variety between runs.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Output cap for question generation, enough for five short questions with
/// options.
pub const GENERATION_MAX_TOKENS: u32 = 1024;

/// Generates up to five questions for a title.
///
/// Model failures are returned as-is and never retried. Malformed model
/// output is not an error: it is normalized into a shorter or empty list.
pub async fn generate_questions(
    ai_provider: &dyn AiProvider,
    prompts: &dyn PromptStore,
    request: &GenerationRequest,
) -> Result<Vec<Question>, ReelError> {
    let template = prompts
        .template(PromptName::QuestionGeneration)
        .ok_or_else(|| {
            ReelError::MissingConfiguration(format!(
                "Prompt template '{}' could not be read",
                PromptName::QuestionGeneration
            ))
        })?;

    let prompt = build_prompt(template, request);
    info!(
        title = request.title().unwrap_or_default(),
        history = request.history().len(),
        "[generate_questions] Requesting questions from the model."
    );
    debug!(system_prompt = %prompt.system, user_prompt = %prompt.user, "--> Sending prompts to AI Provider");

    let raw = ai_provider
        .complete(&ChatRequest::new(
            &prompt.system,
            &prompt.user,
            GENERATION_TEMPERATURE,
            GENERATION_MAX_TOKENS,
        ))
        .await?;
    debug!("<-- Raw questions from AI: {}", raw);

    Ok(normalize_response(&raw))
}
