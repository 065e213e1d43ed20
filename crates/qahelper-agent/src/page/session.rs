//! Per-page-view state driven by host events

use std::sync::Arc;
use std::time::Duration;

use qahelper_core::issue_key::PageLocation;

use super::{ControlKind, Controls, RouteEvent};
use crate::workflow::{Orchestrator, WorkflowOutcome};

pub struct PageSession {
    orchestrator: Arc<Orchestrator>,
    route_settle: Duration,
    location: Option<PageLocation>,
    heading_present: bool,
    controls: Option<Controls>,
}

impl PageSession {
    pub fn new(orchestrator: Arc<Orchestrator>, route_settle: Duration) -> Self {
        Self {
            orchestrator,
            route_settle,
            location: None,
            heading_present: false,
            controls: None,
        }
    }

    pub fn location(&self) -> Option<&PageLocation> {
        self.location.as_ref()
    }

    pub fn controls(&self) -> Option<&Controls> {
        self.controls.as_ref()
    }

    /// Apply one host event. Returns false once the host is closed.
    pub async fn handle(&mut self, event: RouteEvent) -> bool {
        match event {
            RouteEvent::RouteChanged(href) => self.on_route_changed(&href).await,
            RouteEvent::HeadingChanged { present } => self.on_heading_changed(present).await,
            RouteEvent::Activate(kind) => {
                self.activate(kind).await;
            }
            RouteEvent::Reloaded => {
                self.controls = None;
                self.ensure_controls().await;
            }
            RouteEvent::Closed => return false,
        }
        true
    }

    /// Record the new location and inject right away, then retry once the router has settled
    pub async fn on_route_changed(&mut self, href: &str) {
        match PageLocation::parse(href) {
            Ok(location) => self.location = Some(location),
            Err(e) => {
                tracing::warn!("Ignoring route change: {}", e);
                return;
            }
        }

        self.ensure_controls().await;
        tokio::time::sleep(self.route_settle).await;
        self.ensure_controls().await;
    }

    pub async fn on_heading_changed(&mut self, present: bool) {
        self.heading_present = present;
        if present {
            self.ensure_controls().await;
        } else if self.controls.take().is_some() {
            tracing::debug!("Heading swapped out, controls dropped");
        }
    }

    /// Inject the controls if the page shows an issue and they are not there yet.
    /// Returns whether controls are present afterwards.
    pub async fn ensure_controls(&mut self) -> bool {
        let Some(location) = self.location.as_ref() else {
            return false;
        };

        if self.orchestrator.detect_key(location).await.is_err() {
            return false;
        }

        if self.controls.is_some() {
            return true;
        }

        if !self.heading_present {
            return false;
        }

        self.controls = Some(Controls::default());
        tracing::debug!("Controls injected for {}", location.href);
        true
    }

    /// Click a control. Nothing happens if it is not injected or is disabled.
    pub async fn activate(&mut self, kind: ControlKind) -> Option<WorkflowOutcome> {
        let (Some(location), Some(controls)) = (self.location.as_ref(), self.controls.as_mut())
        else {
            tracing::debug!("{:?} activated without controls on the page", kind);
            return None;
        };

        self.orchestrator
            .trigger(kind, location, controls.get_mut(kind))
            .await
    }
}
