//! # Request-Scoped Domain Types
//!
//! Values created and dropped within a single request: the search query, the
//! record of a correction attempt, and the inputs to question generation.

use crate::errors::ReelError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// The most recent Q&A pairs kept as prompt context. Older pairs are dropped
/// first; this bounds prompt size and cost.
pub const MAX_HISTORY: usize = 15;

/// The leading integer of a `page` parameter; anything after it is ignored.
static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("page regex is valid"));

/// A catalog search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    page: u32,
}

impl SearchQuery {
    /// Creates a query from user input. The text is trimmed and must not be
    /// empty; the page is floored at 1.
    pub fn new(text: &str, page: u32) -> Result<Self, ReelError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ReelError::Validation(
                "Query parameter 'q' is required".to_string(),
            ));
        }
        Ok(Self {
            text: text.to_string(),
            page: page.max(1),
        })
    }

    /// Parses a raw `page` parameter from its leading digits, so `"3abc"` is
    /// 3 and `"2.5"` is 2. Missing or digit-less values become 1, anything
    /// below 1 is floored to 1, and values past `u32::MAX` saturate.
    pub fn parse_page(raw: Option<&str>) -> u32 {
        let Some(digits) = raw
            .and_then(|p| LEADING_INTEGER.captures(p))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            return 1;
        };
        match digits.parse::<i64>() {
            Ok(page) => page.clamp(1, u32::MAX as i64) as u32,
            // Only overflow can fail here; the sign decides the bound.
            Err(_) if digits.starts_with('-') => 1,
            Err(_) => u32::MAX,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// The same page with different text, used for the single repeat search.
    pub(crate) fn with_text(&self, text: String) -> Self {
        Self {
            text,
            page: self.page,
        }
    }
}

/// The outcome of asking the model to rewrite a query that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionAttempt {
    pub original: String,
    /// `None` when the model declined, returned nothing, or returned the
    /// original text.
    pub corrected: Option<String>,
}

/// One prior question and its answer. An empty answer means unanswered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub q: String,
    #[serde(default)]
    pub a: String,
}

impl QaPair {
    /// Reads a pair from loosely shaped JSON. Entries without a string `q`
    /// are rejected; a missing or non-string `a` counts as unanswered.
    pub fn from_value(value: &Value) -> Option<Self> {
        let q = value.get("q")?.as_str()?;
        let a = value.get("a").and_then(Value::as_str).unwrap_or_default();
        Some(Self {
            q: q.to_string(),
            a: a.to_string(),
        })
    }

    pub fn is_answered(&self) -> bool {
        !self.a.trim().is_empty()
    }
}

/// Everything question generation needs from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    title: Option<String>,
    overview: String,
    history: Vec<QaPair>,
}

impl GenerationRequest {
    /// Validates the input. The overview is required; a blank title is
    /// treated as absent; only the last [`MAX_HISTORY`] pairs are kept.
    pub fn new(
        title: Option<&str>,
        overview: &str,
        mut history: Vec<QaPair>,
    ) -> Result<Self, ReelError> {
        let overview = overview.trim();
        if overview.is_empty() {
            return Err(ReelError::Validation(
                "body.overview is required".to_string(),
            ));
        }
        if history.len() > MAX_HISTORY {
            history.drain(..history.len() - MAX_HISTORY);
        }
        Ok(Self {
            title: title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            overview: overview.to_string(),
            history,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn overview(&self) -> &str {
        &self.overview
    }

    pub fn history(&self) -> &[QaPair] {
        &self.history
    }
}
