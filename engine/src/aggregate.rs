//! Pure derivation of the flattened issue list and its statistics.
//!
//! Nothing here is cached: callers recompute from the raw results whenever
//! they need the view, so the flattened list can never drift out of sync with
//! the result set that produced it.

use veneer_types::{AnalysisResults, FlattenedIssue, IssueStats, ModelSelection};

/// Flatten per-model, per-file outcomes into one uniform issue list.
///
/// Ordering is stable and significant: models in selection insertion order,
/// then file outcomes in the order the model returned them, then issues in
/// attachment order. Models present in `results` but absent from `selection`
/// do not appear.
#[must_use]
pub fn flatten(selection: &ModelSelection, results: &AnalysisResults) -> Vec<FlattenedIssue> {
    let mut flattened = Vec::new();
    for model in selection.iter() {
        let Some(outcomes) = results.for_model(model) else {
            continue;
        };
        for outcome in outcomes {
            let file = outcome.file_name();
            for issue in &outcome.issues {
                flattened.push(FlattenedIssue {
                    model,
                    file: file.to_string(),
                    issue: issue.clone(),
                });
            }
        }
    }
    flattened
}

/// Severity and category tallies over a flattened list, in a single pass.
/// Both maps are sparse: severities/categories with no issues get no entry.
#[must_use]
pub fn stats(issues: &[FlattenedIssue]) -> IssueStats {
    let mut stats = IssueStats::default();
    for flat in issues {
        *stats.by_severity.entry(flat.issue.severity).or_insert(0) += 1;
        *stats.by_category.entry(flat.issue.category).or_insert(0) += 1;
    }
    stats
}
