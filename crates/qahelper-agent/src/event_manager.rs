//! Workflow event broadcasting

use tokio::sync::broadcast;

use crate::events::WorkflowEvent;

/// Fans workflow events out to any number of subscribers
pub struct EventManager {
    event_tx: broadcast::Sender<WorkflowEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self { event_tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.event_tx.subscribe()
    }

    pub fn emit(&self, event: WorkflowEvent) {
        tracing::debug!(
            "EventManager: {:?} {:?} run {}",
            event.kind,
            event.event_type,
            event.run_id
        );
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}
