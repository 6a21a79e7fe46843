//! Aesthetic issues and their fixed vocabularies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue severity.
///
/// Decoding is lossy: anything the models emit outside the four known values
/// becomes [`Severity::Medium`], so severity counting never has to special-case
/// junk input.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Severity] {
        &[
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ]
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "low" => Severity::Low,
            _ => Severity::Medium,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The aesthetic principle an issue falls under.
///
/// Mirrors the backend's principle table. [`Category::Other`] absorbs values
/// outside the known vocabulary so one odd category cannot reject a whole
/// analysis response.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Category {
    Color,
    Spacing,
    Typography,
    Hierarchy,
    Consistency,
    ModernPatterns,
    Balance,
    Clutter,
    #[default]
    Other,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Spacing => "spacing",
            Category::Typography => "typography",
            Category::Hierarchy => "hierarchy",
            Category::Consistency => "consistency",
            Category::ModernPatterns => "modern_patterns",
            Category::Balance => "balance",
            Category::Clutter => "clutter",
            Category::Other => "other",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Category::Color => "Color",
            Category::Spacing => "Spacing",
            Category::Typography => "Typography",
            Category::Hierarchy => "Hierarchy",
            Category::Consistency => "Consistency",
            Category::ModernPatterns => "Modern Patterns",
            Category::Balance => "Balance",
            Category::Clutter => "Clutter",
            Category::Other => "Other",
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "color" => Category::Color,
            "spacing" => Category::Spacing,
            "typography" => Category::Typography,
            "hierarchy" => Category::Hierarchy,
            "consistency" => Category::Consistency,
            "modern_patterns" => Category::ModernPatterns,
            "balance" => Category::Balance,
            "clutter" => Category::Clutter,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier the backend assigns to one detected issue.
///
/// Unique within one analysis epoch only; a new upload or re-analysis may
/// reuse identifiers. Remediation requests reference issues by this id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One detected aesthetic issue, exactly as the backend attached it to a
/// (model, file) pair.
///
/// Immutable. Deliberately does not carry its model or file name; those are
/// attached when the aggregator flattens results, keeping the flattened record
/// a derived view rather than a second source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "issue_id")]
    pub id: IssueId,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub line_numbers: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}
