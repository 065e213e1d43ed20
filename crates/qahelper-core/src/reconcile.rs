//! Reconciliation of QA sub-issue targets against an issue's existing sub-issues

use crate::models::{SubIssue, TargetSpec};
use serde::Serialize;

pub const NO_ACTION_MESSAGE: &str = "No action: no sub-issues were created.";
const RETRY_GUIDANCE: &str =
    "Retry creation for failed ones or delete the created sub-issues before retrying.";

/// A target that already has a sub-issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExistingMatch {
    pub target: TargetSpec,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedSubIssue {
    pub target: TargetSpec,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSubIssue {
    pub target: TargetSpec,
    pub message: String,
}

/// Result of one creation attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CreationOutcome {
    Created(CreatedSubIssue),
    Failed(FailedSubIssue),
}

impl CreationOutcome {
    pub fn created(target: TargetSpec, key: impl Into<String>) -> Self {
        Self::Created(CreatedSubIssue {
            target,
            key: key.into(),
        })
    }

    pub fn failed(target: TargetSpec, message: impl Into<String>) -> Self {
        Self::Failed(FailedSubIssue {
            target,
            message: message.into(),
        })
    }

    pub fn target(&self) -> TargetSpec {
        match self {
            Self::Created(c) => c.target,
            Self::Failed(f) => f.target,
        }
    }
}

/// Targets split by whether a tagged sub-issue already exists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub existing: Vec<ExistingMatch>,
    pub missing: Vec<TargetSpec>,
}

/// Split `targets` into those already present among `sub_issues` and those still missing.
///
/// A sub-issue counts for a target only when its summary starts with the target prefix
/// followed by a space. The first such sub-issue wins.
pub fn classify(sub_issues: &[SubIssue], targets: &[TargetSpec]) -> Classification {
    let mut classification = Classification::default();

    for target in targets {
        match sub_issues.iter().find(|s| target.tags(&s.summary)) {
            Some(found) => classification.existing.push(ExistingMatch {
                target: *target,
                key: found.reference().to_string(),
            }),
            None => classification.missing.push(*target),
        }
    }

    classification
}

/// Sub-issues whose summary starts with any target prefix, in their original order
pub fn recognized<'a>(sub_issues: &'a [SubIssue], targets: &[TargetSpec]) -> Vec<&'a SubIssue> {
    sub_issues
        .iter()
        .filter(|s| targets.iter().any(|t| s.summary.starts_with(t.prefix)))
        .collect()
}

/// Aggregated outcome of a creation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreationReport {
    pub created: Vec<CreatedSubIssue>,
    pub existing: Vec<ExistingMatch>,
    pub errors: Vec<FailedSubIssue>,
}

impl CreationReport {
    /// Group outcomes. `targets` fixes the order of created and failed entries so the
    /// report does not depend on the order attempts finished in.
    pub fn aggregate(
        targets: &[TargetSpec],
        existing: Vec<ExistingMatch>,
        mut outcomes: Vec<CreationOutcome>,
    ) -> Self {
        outcomes.sort_by_key(|o| {
            targets
                .iter()
                .position(|t| *t == o.target())
                .unwrap_or(usize::MAX)
        });

        let mut report = Self {
            existing,
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome {
                CreationOutcome::Created(c) => report.created.push(c),
                CreationOutcome::Failed(f) => report.errors.push(f),
            }
        }
        report
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_created(&self) -> bool {
        !self.created.is_empty()
    }

    /// Human-readable summary of the run
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if !self.created.is_empty() {
            let list: Vec<String> = self
                .created
                .iter()
                .map(|c| format!("{} ({})", c.target.title, c.key))
                .collect();
            parts.push(format!("Created: {}", list.join(", ")));
        }

        if !self.existing.is_empty() {
            let list: Vec<String> = self
                .existing
                .iter()
                .map(|e| format!("{} ({})", e.target.title, e.key))
                .collect();
            parts.push(format!("Skipped (already exist): {}", list.join(", ")));
        }

        if !self.errors.is_empty() {
            let list: Vec<String> = self
                .errors
                .iter()
                .map(|e| format!("{} — {}", e.target.title, e.message))
                .collect();
            parts.push(format!("Errors: {}. {}", list.join("; "), RETRY_GUIDANCE));
        }

        if self.created.is_empty() && self.errors.is_empty() {
            let skipped = parts.join(". ");
            return if skipped.is_empty() {
                NO_ACTION_MESSAGE.to_string()
            } else {
                format!("{}. {}", skipped, NO_ACTION_MESSAGE)
            };
        }

        parts.join(". ")
    }
}
