//! Transient notifications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

/// Surface that shows one notification at a time
pub trait Notifier: Send + Sync {
    fn show(&self, message: &str, level: NotificationLevel);
}

/// Keeps the visible notification, replaces it on every `show` and clears it once the
/// dismiss delay has passed. Optionally echoes to stdout.
pub struct NotificationCenter {
    current: Arc<Mutex<Option<(u64, Notification)>>>,
    generation: AtomicU64,
    dismiss_after: Duration,
    echo: bool,
}

impl NotificationCenter {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            generation: AtomicU64::new(0),
            dismiss_after,
            echo: false,
        }
    }

    /// Also print every notification to stdout
    pub fn with_echo(mut self) -> Self {
        self.echo = true;
        self
    }

    pub fn current(&self) -> Option<Notification> {
        let guard = self.current.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().map(|(_, n)| n.clone())
    }
}

impl Notifier for NotificationCenter {
    fn show(&self, message: &str, level: NotificationLevel) {
        match level {
            NotificationLevel::Error => tracing::error!("{}", message),
            NotificationLevel::Warning => tracing::warn!("{}", message),
            _ => tracing::info!("{}", message),
        }
        if self.echo {
            println!("[{}] {}", level.as_str().to_uppercase(), message);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut guard = self.current.lock().unwrap_or_else(|e| e.into_inner());
            *guard = Some((
                generation,
                Notification {
                    level,
                    message: message.to_string(),
                    shown_at: Utc::now(),
                },
            ));
        }

        let current = self.current.clone();
        let dismiss_after = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            let mut guard = current.lock().unwrap_or_else(|e| e.into_inner());
            // A newer notification owns its own dismissal
            if matches!(guard.as_ref(), Some((g, _)) if *g == generation) {
                *guard = None;
            }
        });
    }
}
