//! QA Helper Agent Library
//!
//! Workflow orchestration and page-session handling, exposed as a library for testing.

pub mod config;
pub mod deployment;
pub mod event_manager;
pub mod events;
pub mod notify;
pub mod page;
pub mod workflow;

pub use config::ConfigManager;
pub use deployment::DeploymentProvider;
pub use event_manager::EventManager;
pub use events::{WorkflowEvent, WorkflowKind};
pub use notify::{Notification, NotificationCenter, NotificationLevel, Notifier};
pub use page::{ControlKind, ControlState, PageHost, PageSession, RouteEvent};
pub use workflow::{Orchestrator, WorkflowError, WorkflowOutcome, WorkflowState};
