//! QA sub-issue creation

use qahelper_core::assignee::resolve_assignee;
use qahelper_core::issue_type::resolve_qa_subtask_type;
use qahelper_core::models::{IssueKey, TARGET_SUBTASKS};
use qahelper_core::reconcile::{classify, CreationOutcome, CreationReport};
use qahelper_jira::NewSubIssue;

use super::{Orchestrator, Result, WorkflowOutcome, WorkflowState};
use crate::notify::NotificationLevel;

impl Orchestrator {
    /// Make sure both QA sub-issues exist under `key`, creating only the missing ones
    pub async fn create_sub_issues(&self, key: &IssueKey) -> WorkflowOutcome {
        match self.reconcile_sub_issues(key).await {
            Ok(report) => creation_outcome(report),
            Err(e) => WorkflowOutcome::fatal(e),
        }
    }

    async fn reconcile_sub_issues(&self, key: &IssueKey) -> Result<CreationReport> {
        let issue = self.api.get_issue(key).await?;
        let issue_types = self.api.get_issue_types(&issue.project_key).await?;
        let issue_type_id = resolve_qa_subtask_type(&issue_types)?;
        let user = self.api.get_current_user().await?;
        let deployment = self.deployment.get(self.api.as_ref()).await;
        let assignee = resolve_assignee(&user, deployment)?;

        let classification = classify(&issue.sub_issues, &TARGET_SUBTASKS);
        tracing::info!(
            "{}: {} existing, {} missing QA sub-issues",
            key,
            classification.existing.len(),
            classification.missing.len()
        );

        let mut outcomes = Vec::with_capacity(classification.missing.len());
        for target in &classification.missing {
            let new = NewSubIssue {
                project_id: issue.project_id.clone(),
                parent: key.clone(),
                summary: target.summary_for(&issue.summary),
                issue_type_id: issue_type_id.clone(),
                assignee: assignee.clone(),
            };

            let outcome = match self.api.create_sub_issue(&new).await {
                Ok(created) => CreationOutcome::created(*target, created.reference()),
                Err(e) => {
                    tracing::warn!("Creating {} under {} failed: {}", target.title, key, e);
                    CreationOutcome::failed(*target, e.to_string())
                }
            };
            outcomes.push(outcome);
        }

        Ok(CreationReport::aggregate(
            &TARGET_SUBTASKS,
            classification.existing,
            outcomes,
        ))
    }
}

fn creation_outcome(report: CreationReport) -> WorkflowOutcome {
    let message = report.summary();

    let mut outcome = if report.has_errors() {
        WorkflowOutcome::new(
            WorkflowState::PartialFailure,
            NotificationLevel::Warning,
            message,
        )
    } else {
        let level = if report.existing.is_empty() {
            NotificationLevel::Success
        } else {
            NotificationLevel::Info
        };
        let mut outcome = WorkflowOutcome::new(WorkflowState::Success, level, message);
        // Nothing created means nothing to reload for
        outcome.reload = report.has_created();
        outcome
    };

    outcome.report = Some(report);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use qahelper_core::reconcile::ExistingMatch;

    #[test]
    fn test_partial_failure_keeps_page() {
        let report = CreationReport::aggregate(
            &TARGET_SUBTASKS,
            Vec::new(),
            vec![
                CreationOutcome::created(TARGET_SUBTASKS[0], "PRJ-11"),
                CreationOutcome::failed(TARGET_SUBTASKS[1], "boom"),
            ],
        );
        let outcome = creation_outcome(report);
        assert_eq!(outcome.state, WorkflowState::PartialFailure);
        assert_eq!(outcome.level, NotificationLevel::Warning);
        assert!(!outcome.reload);
    }

    #[test]
    fn test_nothing_to_do_is_info_without_reload() {
        let existing = TARGET_SUBTASKS
            .iter()
            .zip(["PRJ-11", "PRJ-12"])
            .map(|(target, key)| ExistingMatch {
                target: *target,
                key: key.to_string(),
            })
            .collect();
        let outcome = creation_outcome(CreationReport::aggregate(
            &TARGET_SUBTASKS,
            existing,
            Vec::new(),
        ));
        assert_eq!(outcome.state, WorkflowState::Success);
        assert_eq!(outcome.level, NotificationLevel::Info);
        assert!(!outcome.reload);
    }

    #[test]
    fn test_all_created_is_success_with_reload() {
        let outcome = creation_outcome(CreationReport::aggregate(
            &TARGET_SUBTASKS,
            Vec::new(),
            vec![
                CreationOutcome::created(TARGET_SUBTASKS[0], "PRJ-11"),
                CreationOutcome::created(TARGET_SUBTASKS[1], "PRJ-12"),
            ],
        ));
        assert_eq!(outcome.level, NotificationLevel::Success);
        assert!(outcome.reload);
    }
}
