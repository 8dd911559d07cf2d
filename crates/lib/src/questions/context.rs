use crate::{
    prompts::labels::{
        HISTORY_INSTRUCTION, HISTORY_LABEL, OVERVIEW_LABEL, TITLE_LABEL, UNANSWERED_MARKER,
    },
    types::{GenerationRequest, MAX_HISTORY},
};

/// A system instruction and the user message that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

/// Builds the question-generation prompt.
///
/// The system instruction is the template as given. The user message carries
/// the synopsis, prefixed by the title when there is one. Prior Q&A pairs, at
/// most the last [`MAX_HISTORY`], are listed after it together with an
/// instruction to avoid repeating them.
pub fn build_prompt(system_template: &str, request: &GenerationRequest) -> ChatPrompt {
    let mut user = match request.title() {
        Some(title) => format!(
            "{TITLE_LABEL}{title}\n\n{OVERVIEW_LABEL}\n{}",
            request.overview()
        ),
        None => format!("{OVERVIEW_LABEL}\n{}", request.overview()),
    };

    let history = request.history();
    let recent = &history[history.len().saturating_sub(MAX_HISTORY)..];
    if !recent.is_empty() {
        user.push_str("\n\n");
        user.push_str(HISTORY_LABEL);
        for (i, pair) in recent.iter().enumerate() {
            let n = i + 1;
            let answer = if pair.is_answered() {
                pair.a.trim()
            } else {
                UNANSWERED_MARKER
            };
            user.push_str(&format!("\nQ{n}: {}\nA{n}: {answer}", pair.q.trim()));
        }
        user.push_str("\n\n");
        user.push_str(HISTORY_INSTRUCTION);
    }

    ChatPrompt {
        system: system_template.trim().to_string(),
        user,
    }
}
