//! # Prompt Templates
//!
//! Instruction templates are plain text files read once at startup and handed
//! to the pipelines through the [`PromptStore`] trait. The fixed labels used to
//! assemble user messages live in [`labels`].

pub mod labels;

use std::{
    collections::HashMap,
    fmt::{self, Debug},
    fs,
    path::Path,
};
use tracing::{info, warn};

/// The templates the pipelines know how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptName {
    /// System instruction for question generation.
    QuestionGeneration,
    /// System instruction for rewriting a search query that found nothing.
    QueryCorrection,
}

impl PromptName {
    pub const ALL: [PromptName; 2] = [PromptName::QuestionGeneration, PromptName::QueryCorrection];

    /// The file name the template is stored under.
    pub fn file_name(&self) -> &'static str {
        match self {
            PromptName::QuestionGeneration => "system-prompt.txt",
            PromptName::QueryCorrection => "query-correction-prompt.txt",
        }
    }
}

impl fmt::Display for PromptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Read-only access to instruction templates.
pub trait PromptStore: Send + Sync + Debug {
    /// Returns the template, or `None` when it could not be read.
    fn template(&self, name: PromptName) -> Option<&str>;
}

/// Templates loaded from a directory when the store is created.
#[derive(Debug, Clone, Default)]
pub struct FilePromptStore {
    templates: HashMap<PromptName, String>,
}

impl FilePromptStore {
    /// Reads every known template from `dir`. A file that is missing,
    /// unreadable or blank is logged and left out rather than failing startup;
    /// the pipeline that needs it decides how to degrade.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut templates = HashMap::new();
        for name in PromptName::ALL {
            let path = dir.join(name.file_name());
            match fs::read_to_string(&path) {
                Ok(content) if !content.trim().is_empty() => {
                    info!(path = %path.display(), "Loaded prompt template.");
                    templates.insert(name, content.trim().to_string());
                }
                Ok(_) => warn!(path = %path.display(), "Prompt template is empty; ignoring it."),
                Err(e) => warn!(path = %path.display(), "Failed to read prompt template: {e}"),
            }
        }
        Self { templates }
    }
}

impl PromptStore for FilePromptStore {
    fn template(&self, name: PromptName) -> Option<&str> {
        self.templates.get(&name).map(String::as_str)
    }
}

/// Templates supplied directly, mostly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPromptStore {
    templates: HashMap<PromptName, String>,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: PromptName, template: &str) -> Self {
        self.templates.insert(name, template.to_string());
        self
    }
}

impl PromptStore for InMemoryPromptStore {
    fn template(&self, name: PromptName) -> Option<&str> {
        self.templates.get(&name).map(String::as_str)
    }
}
