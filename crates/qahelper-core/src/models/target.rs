//! QA sub-issue targets

use serde::Serialize;

/// One of the QA sub-issues that should exist under an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetSpec {
    pub title: &'static str,
    pub prefix: &'static str,
}

impl TargetSpec {
    /// Summary of a sub-issue created for this target under a parent
    pub fn summary_for(&self, parent_summary: &str) -> String {
        format!("{} {}", self.prefix, parent_summary)
    }

    /// Tagged summary as recognized by reconciliation (prefix plus a space)
    pub fn tags(&self, summary: &str) -> bool {
        summary
            .strip_prefix(self.prefix)
            .is_some_and(|rest| rest.starts_with(' '))
    }
}

/// Prefixes are unique
pub const TARGET_SUBTASKS: [TargetSpec; 2] = [
    TargetSpec {
        title: "Тестирование",
        prefix: "[Тестирование]",
    },
    TargetSpec {
        title: "Документация",
        prefix: "[Документация]",
    },
];
