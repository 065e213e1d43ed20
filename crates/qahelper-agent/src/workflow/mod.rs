//! Workflow orchestration
//!
//! A run disables its control (busy), ends in one [`WorkflowState`], and then either re-enables
//! the control or leaves it disabled until the scheduled reload. The orchestrator is the only
//! place where failures turn into notifications and control state.

pub mod convert;
pub mod create;
pub mod key_gate;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use qahelper_core::issue_key::{self, PageLocation};
use qahelper_core::models::IssueKey;
use qahelper_core::reconcile::CreationReport;
use qahelper_jira::TrackerApi;

use crate::deployment::DeploymentProvider;
use crate::event_manager::EventManager;
use crate::events::{WorkflowEvent, WorkflowKind};
use crate::notify::{NotificationLevel, Notifier};
use crate::page::{ControlKind, ControlState, PageHost};
use key_gate::KeyErrorGate;

/// Terminal state of a run. Idle and busy are tracked by [`ControlState::enabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Success,
    PartialFailure,
    Fatal,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Core(#[from] qahelper_core::Error),

    #[error(transparent)]
    Tracker(#[from] qahelper_jira::Error),
}

pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Terminal result of one workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOutcome {
    pub state: WorkflowState,
    pub level: NotificationLevel,
    pub message: String,
    /// Page reload scheduled; the control stays disabled
    pub reload: bool,
    pub report: Option<CreationReport>,
    pub converted: Vec<String>,
}

impl WorkflowOutcome {
    pub(crate) fn new(state: WorkflowState, level: NotificationLevel, message: String) -> Self {
        Self {
            state,
            level,
            message,
            reload: false,
            report: None,
            converted: Vec::new(),
        }
    }

    pub(crate) fn fatal(error: impl std::fmt::Display) -> Self {
        Self::new(
            WorkflowState::Fatal,
            NotificationLevel::Error,
            error.to_string(),
        )
    }
}

pub struct Orchestrator {
    api: Arc<dyn TrackerApi>,
    deployment: Arc<DeploymentProvider>,
    notifier: Arc<dyn Notifier>,
    host: Arc<dyn PageHost>,
    events: Arc<EventManager>,
    reload_delay: Duration,
    key_gate: Mutex<KeyErrorGate>,
}

impl Orchestrator {
    pub fn new(
        api: Arc<dyn TrackerApi>,
        deployment: Arc<DeploymentProvider>,
        notifier: Arc<dyn Notifier>,
        host: Arc<dyn PageHost>,
        events: Arc<EventManager>,
        reload_delay: Duration,
    ) -> Self {
        Self {
            api,
            deployment,
            notifier,
            host,
            events,
            reload_delay,
            key_gate: Mutex::new(KeyErrorGate::default()),
        }
    }

    /// Detect the issue key of `location`.
    ///
    /// A failure is notified unless the same message was already shown for the same URL.
    /// A success clears that memory.
    pub async fn detect_key(&self, location: &PageLocation) -> qahelper_core::Result<IssueKey> {
        let mut gate = self.key_gate.lock().await;
        match issue_key::extract(location) {
            Ok(key) => {
                gate.reset();
                Ok(key)
            }
            Err(e) => {
                let message = e.to_string();
                if gate.admit(&message, &location.href) {
                    tracing::warn!("{} ({})", message, location.href);
                    self.notifier.show(&message, NotificationLevel::Error);
                }
                Err(e)
            }
        }
    }

    /// Run the workflow behind `control` for the page at `location`.
    ///
    /// Returns `None` when the control is disabled because a run is already in progress.
    pub async fn trigger(
        &self,
        kind: ControlKind,
        location: &PageLocation,
        control: &mut ControlState,
    ) -> Option<WorkflowOutcome> {
        if !control.enabled {
            tracing::debug!("{:?} ignored: workflow busy", kind);
            return None;
        }

        // Key errors were already notified through the gate
        let key = match self.detect_key(location).await {
            Ok(key) => key,
            Err(e) => return Some(WorkflowOutcome::fatal(e)),
        };

        let workflow = kind.workflow();
        let run_id = WorkflowEvent::new_run_id();
        control.begin();
        self.events.emit(WorkflowEvent::started(
            run_id.clone(),
            workflow,
            Some(key.to_string()),
        ));
        tracing::info!("{:?} started for {}", workflow, key);

        let outcome = match workflow {
            WorkflowKind::CreateSubIssues => self.create_sub_issues(&key).await,
            WorkflowKind::ConvertSubIssues => self.convert_sub_issues(&key).await,
        };

        self.notifier.show(&outcome.message, outcome.level);
        if outcome.reload {
            self.host.schedule_reload(self.reload_delay);
        } else {
            control.reset();
        }

        tracing::info!("{:?} finished for {}: {:?}", workflow, key, outcome.state);
        self.events.emit(WorkflowEvent::finished(
            run_id,
            workflow,
            Some(key.to_string()),
            outcome.state,
            outcome.message.clone(),
        ));

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_state_is_terminal_only() {
        assert_eq!(
            serde_json::to_string(&WorkflowState::PartialFailure).unwrap(),
            "\"partial_failure\""
        );
        assert!(serde_json::from_str::<WorkflowState>("\"busy\"").is_err());
        assert!(serde_json::from_str::<WorkflowState>("\"idle\"").is_err());
    }

    #[test]
    fn test_fatal_outcome() {
        let outcome = WorkflowOutcome::fatal(qahelper_core::Error::AssigneeUnresolved);
        assert_eq!(outcome.state, WorkflowState::Fatal);
        assert_eq!(outcome.level, NotificationLevel::Error);
        assert_eq!(outcome.message, "cannot determine assignee");
        assert!(!outcome.reload);
    }
}
