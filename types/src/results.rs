//! Raw per-model analysis results and the flattened view derived from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::issue::{Category, Issue, Severity};
use crate::model::Model;

/// File name used in the flattened view when a file outcome carries no name.
pub const UNKNOWN_FILE: &str = "Unknown";

/// The file a result block refers to, as echoed back by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// One model's outcome for one uploaded file: zero or more issues plus the
/// backend's own issue tally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    #[serde(default)]
    pub file_info: Option<FileInfo>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub total_issues: u32,
}

impl FileOutcome {
    /// The display name for this outcome's file, falling back to the
    /// [`UNKNOWN_FILE`] sentinel.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_info
            .as_ref()
            .and_then(|info| info.name.as_deref())
            .unwrap_or(UNKNOWN_FILE)
    }
}

/// The complete raw result set of one analysis epoch, keyed by model.
///
/// Replaced wholesale by every successful analysis; never merged with a prior
/// set. Map keys the client does not recognize as models are dropped at the
/// boundary rather than failing the decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResults(BTreeMap<Model, Vec<FileOutcome>>);

impl AnalysisResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model: Model, outcomes: Vec<FileOutcome>) {
        self.0.insert(model, outcomes);
    }

    #[must_use]
    pub fn for_model(&self, model: Model) -> Option<&[FileOutcome]> {
        self.0.get(&model).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn models(&self) -> impl Iterator<Item = Model> + '_ {
        self.0.keys().copied()
    }
}

impl<'de> Deserialize<'de> for AnalysisResults {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: BTreeMap<String, Vec<FileOutcome>> = BTreeMap::deserialize(deserializer)?;
        let mut results = BTreeMap::new();
        for (key, outcomes) in raw {
            if let Ok(model) = Model::parse(&key) {
                results.insert(model, outcomes);
            }
        }
        Ok(Self(results))
    }
}

/// One issue with its model and file attached: the uniform, UI-ready record.
///
/// A derived view over [`AnalysisResults`]; recomputed from the raw set, never
/// stored back into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedIssue {
    pub model: Model,
    pub file: String,
    pub issue: Issue,
}

/// Severity and category tallies over one flattened issue list.
///
/// Both maps are sparse: a severity or category with zero issues has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueStats {
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_category: BTreeMap<Category, usize>,
}

impl IssueStats {
    #[must_use]
    pub fn severity(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn category(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.by_severity.values().sum()
    }
}
