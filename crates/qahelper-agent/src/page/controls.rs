//! The two page controls and their state

use serde::{Deserialize, Serialize};

use crate::events::WorkflowKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    CreateSubIssues,
    ConvertSubIssues,
}

impl ControlKind {
    pub fn idle_label(self) -> &'static str {
        match self {
            Self::CreateSubIssues => "➕ Create QA sub-issues",
            Self::ConvertSubIssues => "🔄 Convert sub-issues",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            Self::CreateSubIssues => "Creating...",
            Self::ConvertSubIssues => "Converting...",
        }
    }

    pub fn workflow(self) -> WorkflowKind {
        match self {
            Self::CreateSubIssues => WorkflowKind::CreateSubIssues,
            Self::ConvertSubIssues => WorkflowKind::ConvertSubIssues,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub kind: ControlKind,
    pub enabled: bool,
    pub label: String,
}

impl ControlState {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            enabled: true,
            label: kind.idle_label().to_string(),
        }
    }

    /// Disable while a workflow runs
    pub fn begin(&mut self) {
        self.enabled = false;
        self.label = self.kind.busy_label().to_string();
    }

    pub fn reset(&mut self) {
        self.enabled = true;
        self.label = self.kind.idle_label().to_string();
    }
}

/// Controls injected next to the issue heading for one page view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub create: ControlState,
    pub convert: ControlState,
}

impl Controls {
    pub fn get_mut(&mut self, kind: ControlKind) -> &mut ControlState {
        match kind {
            ControlKind::CreateSubIssues => &mut self.create,
            ControlKind::ConvertSubIssues => &mut self.convert,
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            create: ControlState::new(ControlKind::CreateSubIssues),
            convert: ControlState::new(ControlKind::ConvertSubIssues),
        }
    }
}
