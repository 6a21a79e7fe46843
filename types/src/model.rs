//! Analysis model enumeration and the user's model selection.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The analysis models the backend can drive.
///
/// The wire identifier is the serde rename; [`Model::as_str`] returns the
/// same string for URL and request building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Model {
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "claude-opus-4")]
    ClaudeOpus4,
    #[serde(rename = "deepseek-v3")]
    DeepseekV3,
    #[serde(rename = "llama-maverick")]
    LlamaMaverick,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelParseError {
    #[error("model identifier cannot be empty")]
    Empty,
    #[error("unknown model identifier '{0}'")]
    Unknown(String),
}

impl Model {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::ClaudeOpus4 => "claude-opus-4",
            Model::DeepseekV3 => "deepseek-v3",
            Model::LlamaMaverick => "llama-maverick",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Model::Gpt4o => "GPT-4o",
            Model::ClaudeOpus4 => "Claude Opus 4",
            Model::DeepseekV3 => "DeepSeek V3",
            Model::LlamaMaverick => "LLaMA Maverick",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ModelParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelParseError::Empty);
        }
        Model::all()
            .iter()
            .copied()
            .find(|model| model.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelParseError::Unknown(trimmed.to_string()))
    }

    #[must_use]
    pub const fn all() -> &'static [Model] {
        &[
            Model::Gpt4o,
            Model::ClaudeOpus4,
            Model::DeepseekV3,
            Model::LlamaMaverick,
        ]
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered set of models chosen for the next analysis run.
///
/// Uniqueness is maintained on insert; iteration order is insertion order,
/// which is also the order the aggregator walks results in. Must be non-empty
/// before an analysis can start (checked by the orchestrator, not here).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSelection(Vec<Model>);

impl ModelSelection {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn single(model: Model) -> Self {
        Self(vec![model])
    }

    /// Add the model if absent, remove it if present.
    pub fn toggle(&mut self, model: Model) {
        if let Some(pos) = self.0.iter().position(|m| *m == model) {
            self.0.remove(pos);
        } else {
            self.0.push(model);
        }
    }

    #[must_use]
    pub fn contains(&self, model: Model) -> bool {
        self.0.contains(&model)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Model> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Model] {
        &self.0
    }
}

impl FromIterator<Model> for ModelSelection {
    fn from_iter<I: IntoIterator<Item = Model>>(iter: I) -> Self {
        let mut selection = Self::new();
        for model in iter {
            if !selection.contains(model) {
                selection.0.push(model);
            }
        }
        selection
    }
}
