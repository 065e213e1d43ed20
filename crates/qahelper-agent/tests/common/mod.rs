#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use qahelper_agent::{
    DeploymentProvider, EventManager, NotificationLevel, Notifier, Orchestrator, PageHost,
};
use qahelper_core::models::{Identity, IssueKey, IssueTypeDescriptor, SubIssue};
use qahelper_jira::{
    CreatedIssue, Error as JiraError, IssueDetails, NewSubIssue, Result as JiraResult,
    ServerInfo, TrackerApi,
};

pub const RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// In-memory tracker holding a single parent issue
pub struct FakeTracker {
    pub issue: Mutex<IssueDetails>,
    pub issue_types: Mutex<Vec<IssueTypeDescriptor>>,
    pub user: Mutex<Identity>,
    pub deployment_type: Mutex<Option<String>>,
    pub fail_issue_read: Mutex<bool>,
    /// Sub-issue summaries starting with one of these fail to create
    pub fail_create_prefixes: Mutex<Vec<String>>,
    /// Issue keys whose type change fails
    pub fail_convert_keys: Mutex<Vec<String>>,
    pub next_number: AtomicU32,
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<NewSubIssue>>,
}

impl FakeTracker {
    pub fn new(sub_issues: Vec<SubIssue>) -> Self {
        Self {
            issue: Mutex::new(IssueDetails {
                key: "PRJ-10".to_string(),
                summary: "PRJ-10".to_string(),
                project_id: "100".to_string(),
                project_key: "PRJ".to_string(),
                sub_issues,
            }),
            issue_types: Mutex::new(vec![
                IssueTypeDescriptor::new("1", "Task", false),
                IssueTypeDescriptor::new("10001", "QA-Subtask", true),
            ]),
            user: Mutex::new(Identity::with_account_id("acc1")),
            deployment_type: Mutex::new(Some("Cloud".to_string())),
            fail_issue_read: Mutex::new(false),
            fail_create_prefixes: Mutex::new(Vec::new()),
            fail_convert_keys: Mutex::new(Vec::new()),
            next_number: AtomicU32::new(11),
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn api_error(operation: &str, status: u16, body: &str) -> JiraError {
        JiraError::Api {
            operation: operation.to_string(),
            status,
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl TrackerApi for FakeTracker {
    async fn get_issue(&self, key: &IssueKey) -> JiraResult<IssueDetails> {
        self.record(format!("get_issue {}", key));
        if *self.fail_issue_read.lock().unwrap() {
            return Err(Self::api_error("read issue", 500, "server exploded"));
        }
        Ok(self.issue.lock().unwrap().clone())
    }

    async fn get_current_user(&self) -> JiraResult<Identity> {
        self.record("get_current_user".to_string());
        Ok(self.user.lock().unwrap().clone())
    }

    async fn get_server_info(&self) -> JiraResult<ServerInfo> {
        self.record("get_server_info".to_string());
        match self.deployment_type.lock().unwrap().clone() {
            Some(deployment_type) => Ok(ServerInfo {
                deployment_type: Some(deployment_type),
                ..ServerInfo::default()
            }),
            None => Err(Self::api_error("read server info", 404, "")),
        }
    }

    async fn get_issue_types(&self, project_key: &str) -> JiraResult<Vec<IssueTypeDescriptor>> {
        self.record(format!("get_issue_types {}", project_key));
        Ok(self.issue_types.lock().unwrap().clone())
    }

    async fn create_sub_issue(&self, new: &NewSubIssue) -> JiraResult<CreatedIssue> {
        self.record(format!("create {}", new.summary));
        let fails = self
            .fail_create_prefixes
            .lock()
            .unwrap()
            .iter()
            .any(|p| new.summary.starts_with(p.as_str()));
        if fails {
            return Err(Self::api_error("create sub-issue", 400, "bad"));
        }

        let key = format!("PRJ-{}", self.next_number.fetch_add(1, Ordering::SeqCst));
        self.created.lock().unwrap().push(new.clone());
        self.issue
            .lock()
            .unwrap()
            .sub_issues
            .push(SubIssue::new(key.clone(), new.summary.clone()));
        Ok(CreatedIssue {
            id: "0".to_string(),
            key: Some(key),
        })
    }

    async fn change_issue_type(&self, issue: &str, issue_type_id: &str) -> JiraResult<()> {
        self.record(format!("convert {} {}", issue, issue_type_id));
        if self
            .fail_convert_keys
            .lock()
            .unwrap()
            .iter()
            .any(|k| k == issue)
        {
            return Err(Self::api_error(&format!("convert {}", issue), 400, "nope"));
        }
        Ok(())
    }

    async fn link_relates(&self, inward: &str, outward: &str) -> JiraResult<()> {
        self.record(format!("link {} {}", inward, outward));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<(NotificationLevel, String)>>,
}

impl RecordingNotifier {
    pub fn shown(&self) -> Vec<(NotificationLevel, String)> {
        self.shown.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(NotificationLevel, String)> {
        self.shown().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, level: NotificationLevel) {
        self.shown.lock().unwrap().push((level, message.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub reloads: Mutex<Vec<Duration>>,
}

impl RecordingHost {
    pub fn reloads(&self) -> Vec<Duration> {
        self.reloads.lock().unwrap().clone()
    }
}

impl PageHost for RecordingHost {
    fn schedule_reload(&self, delay: Duration) {
        self.reloads.lock().unwrap().push(delay);
    }
}

pub struct Harness {
    pub tracker: Arc<FakeTracker>,
    pub notifier: Arc<RecordingNotifier>,
    pub host: Arc<RecordingHost>,
    pub events: Arc<EventManager>,
    pub orchestrator: Arc<Orchestrator>,
}

impl Harness {
    pub fn new(tracker: FakeTracker) -> Self {
        Self::with_deployment(tracker, DeploymentProvider::new())
    }

    pub fn with_deployment(tracker: FakeTracker, deployment: DeploymentProvider) -> Self {
        let tracker = Arc::new(tracker);
        let notifier = Arc::new(RecordingNotifier::default());
        let host = Arc::new(RecordingHost::default());
        let events = Arc::new(EventManager::new());
        let orchestrator = Arc::new(Orchestrator::new(
            tracker.clone(),
            Arc::new(deployment),
            notifier.clone(),
            host.clone(),
            events.clone(),
            RELOAD_DELAY,
        ));

        Self {
            tracker,
            notifier,
            host,
            events,
            orchestrator,
        }
    }
}

pub fn issue_page() -> qahelper_core::issue_key::PageLocation {
    qahelper_core::issue_key::PageLocation::parse("https://jira.example.com/browse/PRJ-10")
        .unwrap()
}
