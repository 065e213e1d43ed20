//! Issue type selection from a project's type catalog

use crate::models::IssueTypeDescriptor;
use crate::{Error, Result};

const QA_SUBTASK_NAME: &str = "qa-subtask";
const QA_PREFIX: &str = "qa";
const AQA_PREFIX: &str = "aqa";

/// Pick the sub-issue type used for QA sub-issues.
///
/// Preference: exact `qa-subtask`, then a name starting with `qa`, then a name containing
/// `qa` that does not start with `aqa`, then any sub-issue type. Within the catch-all,
/// `aqa` tooling types are only taken when nothing else exists.
pub fn resolve_qa_subtask_type(catalog: &[IssueTypeDescriptor]) -> Result<String> {
    let subtasks: Vec<(&IssueTypeDescriptor, String)> = catalog
        .iter()
        .filter(|t| t.is_subtask)
        .map(|t| (t, t.normalized_name()))
        .collect();

    let rules: [&dyn Fn(&str) -> bool; 5] = [
        &|name: &str| name == QA_SUBTASK_NAME,
        &|name: &str| name.starts_with(QA_PREFIX),
        &|name: &str| name.contains(QA_PREFIX) && !name.starts_with(AQA_PREFIX),
        &|name: &str| !name.starts_with(AQA_PREFIX),
        &|_: &str| true,
    ];

    rules
        .iter()
        .find_map(|rule| subtasks.iter().find(|(_, name)| rule(name.as_str())))
        .map(|(t, _)| t.id.clone())
        .ok_or(Error::QaSubtaskTypeNotFound)
}

/// Pick the type a QA sub-issue is converted to: `qa`, then `task`, then the first
/// non-sub-issue type in catalog order.
pub fn resolve_standard_type(catalog: &[IssueTypeDescriptor]) -> Result<String> {
    let standard: Vec<&IssueTypeDescriptor> = catalog.iter().filter(|t| !t.is_subtask).collect();

    let preferred = ["qa", "task"]
        .iter()
        .find_map(|wanted| standard.iter().find(|t| t.normalized_name() == *wanted));

    preferred
        .or_else(|| standard.first())
        .map(|t| t.id.clone())
        .ok_or(Error::StandardTypeNotFound)
}
