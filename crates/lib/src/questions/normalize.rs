//! # Model Response Normalization
//!
//! Models are asked for a JSON array but do not always comply. The response
//! runs through an ordered list of stages; the first stage that yields a
//! result wins:
//!
//! 1. strip markdown code fences,
//! 2. parse strictly as a JSON array,
//! 3. replace raw line breaks with spaces and parse once more,
//! 4. fall back to one question per non-empty line.
//!
//! None of the stages fail; bad input shrinks the result instead.

use super::{Question, MAX_OPTIONS, MAX_QUESTIONS};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

const FENCE: &str = "```";

/// Quote characters removed from the ends of fallback lines.
const QUOTES: [char; 6] = ['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

static FENCE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```([A-Za-z0-9_+-]*)").expect("fence regex is valid"));

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("line break regex is valid"));

/// Normalizes raw model output into at most [`MAX_QUESTIONS`] questions.
pub fn normalize_response(raw: &str) -> Vec<Question> {
    let stripped = strip_fences(raw);

    if let Some(questions) = parse_json_array(&stripped) {
        debug!(count = questions.len(), "Normalized model output as strict JSON.");
        return questions;
    }
    if let Some(questions) = parse_json_array(&repair_line_breaks(&stripped)) {
        debug!(count = questions.len(), "Normalized model output after line-break repair.");
        return questions;
    }

    let questions = split_lines(&stripped);
    debug!(count = questions.len(), "Normalized model output line by line.");
    questions
}

/// Removes leading code-fence markers (with an optional language tag) and
/// trailing markers, trimming whitespace. Runs until nothing changes, so
/// applying it to its own output is a no-op.
pub fn strip_fences(raw: &str) -> String {
    let mut text = raw.trim();
    loop {
        let before = text.len();
        if let Some(rest) = strip_leading_fence(text) {
            text = rest.trim();
        }
        if let Some(rest) = text.strip_suffix(FENCE) {
            text = rest.trim();
        }
        if text.len() == before {
            return text.to_string();
        }
    }
}

fn strip_leading_fence(text: &str) -> Option<&str> {
    let caps = FENCE_TAG.captures(text)?;
    let whole = caps.get(0)?;
    let rest = &text[whole.end()..];
    // A tag is only a tag when it ends the word; "```Q1 ..." keeps its text.
    let tag_ends_here = rest
        .chars()
        .next()
        .map_or(true, |c| c.is_whitespace() || c == '[' || c == '{');
    if tag_ends_here {
        Some(rest)
    } else {
        Some(&text[FENCE.len()..])
    }
}

fn repair_line_breaks(text: &str) -> String {
    LINE_BREAKS.replace_all(text, " ").into_owned()
}

/// Parses `text` as a JSON array of questions. Returns `None` when the text is
/// not JSON or not an array; a parsed array is final even when every element
/// was dropped.
fn parse_json_array(text: &str) -> Option<Vec<Question>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(text) else {
        return None;
    };
    Some(
        items
            .iter()
            .filter_map(question_from_value)
            .take(MAX_QUESTIONS)
            .collect(),
    )
}

/// Accepts a bare string or an object with a string `q`; anything else is
/// dropped.
fn question_from_value(value: &Value) -> Option<Question> {
    match value {
        Value::String(text) => non_empty(text).map(|t| Question::Plain(t.to_string())),
        Value::Object(map) => {
            let text = non_empty(map.get("q")?.as_str()?)?;
            let options = map
                .get("options")
                .and_then(Value::as_array)
                .map(|options| normalize_options(options))
                .unwrap_or_default();
            Some(Question::new(text, options))
        }
        _ => None,
    }
}

/// Keeps string options with whitespace runs collapsed. Duplicates are kept.
fn normalize_options(options: &[Value]) -> Vec<String> {
    options
        .iter()
        .filter_map(Value::as_str)
        .map(|option| option.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|option| !option.is_empty())
        .take(MAX_OPTIONS)
        .collect()
}

fn split_lines(text: &str) -> Vec<Question> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(FENCE))
        .take(MAX_QUESTIONS)
        .map(strip_quotes)
        .filter(|line| !line.is_empty())
        .map(|line| Question::Plain(line.to_string()))
        .collect()
}

/// Strips one layer of straight or curly quotes from either end.
pub(crate) fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(QUOTES).unwrap_or(text);
    let text = text.strip_suffix(QUOTES).unwrap_or(text);
    text.trim()
}

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}
