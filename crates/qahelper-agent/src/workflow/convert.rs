//! Conversion of QA sub-issues into standalone issues
//!
//! Unlike creation there is no per-item recovery: the first failing conversion or link
//! aborts the run, leaving earlier items converted.

use qahelper_core::issue_type::resolve_standard_type;
use qahelper_core::models::{IssueKey, TARGET_SUBTASKS};
use qahelper_core::reconcile::recognized;

use super::{Orchestrator, Result, WorkflowOutcome, WorkflowState};
use crate::notify::NotificationLevel;

pub const NOTHING_TO_CONVERT: &str = "No matching sub-issues found";

impl Orchestrator {
    /// Convert the QA sub-issues of `key` to a standard type and link them back to it
    pub async fn convert_sub_issues(&self, key: &IssueKey) -> WorkflowOutcome {
        match self.convert_and_link(key).await {
            Ok(None) => WorkflowOutcome::new(
                WorkflowState::PartialFailure,
                NotificationLevel::Warning,
                NOTHING_TO_CONVERT.to_string(),
            ),
            Ok(Some(converted)) => {
                let mut outcome = WorkflowOutcome::new(
                    WorkflowState::Success,
                    NotificationLevel::Success,
                    format!("Converted and linked: {}", converted.join(", ")),
                );
                outcome.reload = true;
                outcome.converted = converted;
                outcome
            }
            Err(e) => WorkflowOutcome::fatal(e),
        }
    }

    /// `None` when the issue has no QA sub-issues
    async fn convert_and_link(&self, key: &IssueKey) -> Result<Option<Vec<String>>> {
        let issue = self.api.get_issue(key).await?;
        let targets = recognized(&issue.sub_issues, &TARGET_SUBTASKS);
        if targets.is_empty() {
            return Ok(None);
        }

        let issue_types = self.api.get_issue_types(&issue.project_key).await?;
        let issue_type_id = resolve_standard_type(&issue_types)?;

        let mut converted = Vec::with_capacity(targets.len());
        for sub_issue in targets {
            let sub_key = sub_issue.reference();
            self.api.change_issue_type(sub_key, &issue_type_id).await?;
            self.api.link_relates(sub_key, key.as_str()).await?;
            tracing::info!("Converted {} and linked it to {}", sub_key, key);
            converted.push(sub_key.to_string());
        }

        Ok(Some(converted))
    }
}
