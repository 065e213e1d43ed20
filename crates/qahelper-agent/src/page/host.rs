//! Host page abstraction

use std::str::FromStr;
use std::time::Duration;
use tokio::sync::mpsc;

use qahelper_core::issue_key::PageLocation;
use qahelper_core::models::JiraConfig;

use super::ControlKind;

/// Things the host page can do for the workflows
pub trait PageHost: Send + Sync {
    fn schedule_reload(&self, delay: Duration);
}

/// Events the host environment emits instead of being polled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEvent {
    /// Client-side navigation to a new URL
    RouteChanged(String),
    /// The issue heading was rendered or swapped out
    HeadingChanged { present: bool },
    /// A control was clicked
    Activate(ControlKind),
    /// Full page load
    Reloaded,
    /// Host is gone
    Closed,
}

impl FromStr for RouteEvent {
    type Err = String;

    /// Line protocol: `route <url>`, `heading on|off`, `create`, `convert`, `reload`, `close`
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((line, ""));

        match (command, argument) {
            ("route", url) if !url.is_empty() => Ok(Self::RouteChanged(url.to_string())),
            ("heading", "on") => Ok(Self::HeadingChanged { present: true }),
            ("heading", "off") => Ok(Self::HeadingChanged { present: false }),
            ("create", "") => Ok(Self::Activate(ControlKind::CreateSubIssues)),
            ("convert", "") => Ok(Self::Activate(ControlKind::ConvertSubIssues)),
            ("reload", "") => Ok(Self::Reloaded),
            ("close", "") => Ok(Self::Closed),
            _ => Err(format!("Unrecognized event '{}'", line)),
        }
    }
}

/// Wait for the first route whose page can name the tracker URL.
///
/// Events read meanwhile, including that route, are appended to `pending` for replay.
/// Returns `None` if the host closes first.
pub async fn first_tracker_url(
    jira: &JiraConfig,
    events: &mut mpsc::UnboundedReceiver<RouteEvent>,
    pending: &mut Vec<RouteEvent>,
) -> Option<String> {
    while let Some(event) = events.recv().await {
        if event == RouteEvent::Closed {
            return None;
        }

        let base_url = match &event {
            RouteEvent::RouteChanged(href) => {
                match PageLocation::parse(href).and_then(|page| jira.base_url_for(&page)) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!("No tracker URL for {}: {}", href, e);
                        None
                    }
                }
            }
            _ => None,
        };

        pending.push(event);
        if base_url.is_some() {
            return base_url;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        assert_eq!(
            "route https://jira.example.com/browse/PRJ-1".parse::<RouteEvent>(),
            Ok(RouteEvent::RouteChanged(
                "https://jira.example.com/browse/PRJ-1".to_string()
            ))
        );
        assert_eq!(
            " heading off ".parse::<RouteEvent>(),
            Ok(RouteEvent::HeadingChanged { present: false })
        );
        assert_eq!(
            "create".parse::<RouteEvent>(),
            Ok(RouteEvent::Activate(ControlKind::CreateSubIssues))
        );
        assert!("route".parse::<RouteEvent>().is_err());
        assert!("explode now".parse::<RouteEvent>().is_err());
    }

    #[tokio::test]
    async fn test_tracker_url_from_first_issue_page() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(RouteEvent::HeadingChanged { present: true }).unwrap();
        tx.send(RouteEvent::RouteChanged("not a url".to_string())).unwrap();
        tx.send(RouteEvent::RouteChanged(
            "https://jira.acme.io/browse/PRJ-1".to_string(),
        ))
        .unwrap();

        let mut pending = Vec::new();
        let url = first_tracker_url(&JiraConfig::default(), &mut rx, &mut pending).await;

        assert_eq!(url.as_deref(), Some("https://jira.acme.io"));
        assert_eq!(pending.len(), 3);
        assert_eq!(pending[0], RouteEvent::HeadingChanged { present: true });
    }

    #[tokio::test]
    async fn test_configured_tracker_url_used_on_first_route() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(RouteEvent::RouteChanged(
            "https://jira.acme.io/browse/PRJ-1".to_string(),
        ))
        .unwrap();

        let jira = JiraConfig {
            base_url: Some("https://jira.internal".to_string()),
            ..JiraConfig::default()
        };
        let mut pending = Vec::new();
        let url = first_tracker_url(&jira, &mut rx, &mut pending).await;
        assert_eq!(url.as_deref(), Some("https://jira.internal"));
    }

    #[tokio::test]
    async fn test_no_tracker_url_when_host_closes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(RouteEvent::Reloaded).unwrap();
        tx.send(RouteEvent::Closed).unwrap();

        let mut pending = Vec::new();
        let url = first_tracker_url(&JiraConfig::default(), &mut rx, &mut pending).await;
        assert!(url.is_none());
        assert_eq!(pending, vec![RouteEvent::Reloaded]);
    }
}
