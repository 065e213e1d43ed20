//! QA Helper
//!
//! Creates and converts QA sub-issues for the issue page the user is looking at.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use qahelper_agent::page::first_tracker_url;
use qahelper_agent::{
    ConfigManager, ControlKind, ControlState, DeploymentProvider, EventManager,
    NotificationCenter, Orchestrator, PageHost, PageSession, RouteEvent, WorkflowState,
};
use qahelper_core::issue_key::PageLocation;
use qahelper_core::models::Config;
use qahelper_core::storage::init_data_dir;
use qahelper_jira::auth::JiraAuth;
use qahelper_jira::JiraClient;

#[derive(Parser, Debug)]
#[command(name = "qahelper")]
#[command(about = "QA Helper - QA sub-issue automation for JIRA", long_about = None)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JIRA base URL, overrides the config file and the page origin
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level, overrides the config file
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the missing QA sub-issues for the issue page at URL
    Create { url: String },
    /// Convert the QA sub-issues of the issue page at URL into linked issues
    Convert { url: String },
    /// Read host events from stdin (`route <url>`, `heading on|off`, `create`, `convert`)
    Watch,
    /// Store the API token (read from stdin) in the OS keyring
    Login {
        #[arg(long)]
        username: String,
    },
}

/// Reload requests from the workflows. In watch mode the reload comes back as a host event.
struct TerminalHost {
    events: Option<mpsc::UnboundedSender<RouteEvent>>,
}

impl PageHost for TerminalHost {
    fn schedule_reload(&self, delay: Duration) {
        tracing::info!("Page reload scheduled in {} ms", delay.as_millis());
        if let Some(events) = self.events.clone() {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = events.send(RouteEvent::Reloaded);
            });
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config_manager = ConfigManager::new(args.config.clone())?;
    let mut config = config_manager.get().await;
    if let Some(url) = args.base_url.clone() {
        config.jira.base_url = Some(url);
    }
    if let Some(level) = args.log_level.clone() {
        config.log_level = level;
    }
    config.validate()?;

    init_logging(&config.log_level)?;

    match args.command {
        Command::Login { username } => {
            login(&config_manager, username).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Create { url } => run_once(&config, ControlKind::CreateSubIssues, &url).await,
        Command::Convert { url } => run_once(&config, ControlKind::ConvertSubIssues, &url).await,
        Command::Watch => {
            watch(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let data_dir = init_data_dir()?;
    let log_file_path = data_dir.join("qahelper.log");

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    // Terminal gets warnings only; notifications are printed separately
    use tracing_subscriber::fmt::writer::MakeWriterExt;
    let stderr_writer = std::io::stderr.with_max_level(tracing::Level::WARN);
    let file_writer = log_file.with_max_level(tracing::Level::DEBUG);

    tracing_subscriber::fmt()
        .with_writer(stderr_writer.and(file_writer))
        .with_env_filter(level)
        .with_ansi(false)
        .init();

    tracing::debug!("Log file: {}", log_file_path.display());
    Ok(())
}

async fn login(config_manager: &ConfigManager, username: String) -> Result<()> {
    let mut token = String::new();
    std::io::stdin()
        .read_line(&mut token)
        .context("Failed to read API token from stdin")?;

    JiraAuth::new(username.clone(), token.trim().to_string()).store_in_keyring()?;
    config_manager
        .update_jira_config(None, Some(username.clone()))
        .await?;

    println!("API token stored for {}", username);
    Ok(())
}

fn build_orchestrator(
    config: &Config,
    base_url: &str,
    host: Arc<dyn PageHost>,
) -> Result<Arc<Orchestrator>> {
    let auth = match config.jira.username.as_deref() {
        Some(username) => Some(JiraAuth::resolve(username)?),
        None => {
            tracing::warn!("No username configured, sending unauthenticated requests");
            None
        }
    };
    tracing::debug!("Using tracker at {}", base_url);
    let client = JiraClient::new(base_url, auth.as_ref())?;

    let deployment = match config.jira.deployment {
        Some(deployment) => DeploymentProvider::fixed(deployment),
        None => DeploymentProvider::new(),
    };
    let notifier = Arc::new(
        NotificationCenter::new(Duration::from_millis(config.ui.notification_dismiss_ms))
            .with_echo(),
    );

    let orchestrator = Orchestrator::new(
        Arc::new(client),
        Arc::new(deployment),
        notifier,
        host,
        Arc::new(EventManager::new()),
        Duration::from_millis(config.ui.reload_delay_ms),
    );
    Ok(Arc::new(orchestrator))
}

async fn run_once(config: &Config, kind: ControlKind, url: &str) -> Result<ExitCode> {
    let location = PageLocation::parse(url)?;
    let base_url = config.jira.base_url_for(&location)?;
    let host = Arc::new(TerminalHost { events: None });
    let orchestrator = build_orchestrator(config, &base_url, host)?;

    let mut control = ControlState::new(kind);
    let outcome = orchestrator.trigger(kind, &location, &mut control).await;

    Ok(match outcome.map(|o| o.state) {
        Some(WorkflowState::Success) => ExitCode::SUCCESS,
        Some(WorkflowState::PartialFailure) => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    })
}

async fn watch(config: &Config) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());

    let mut pending = Vec::new();
    let base_url = match config.jira.base_url.clone() {
        Some(url) => url,
        None => match first_tracker_url(&config.jira, &mut rx, &mut pending).await {
            Some(url) => url,
            None => {
                tracing::info!("Host closed before any issue page was opened");
                return Ok(());
            }
        },
    };

    let host = Arc::new(TerminalHost { events: Some(tx) });
    let orchestrator = build_orchestrator(config, &base_url, host)?;
    let mut session = PageSession::new(
        orchestrator,
        Duration::from_millis(config.ui.route_settle_ms),
    );

    for event in pending {
        if !session.handle(event).await {
            return Ok(());
        }
    }

    while let Some(event) = rx.recv().await {
        if !session.handle(event).await {
            break;
        }
    }

    tracing::info!("Host closed, shutting down");
    Ok(())
}

fn spawn_event_reader(tx: mpsc::UnboundedSender<RouteEvent>) {
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => match line.parse::<RouteEvent>() {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("{}", e),
                },
                Ok(None) => {
                    let _ = tx.send(RouteEvent::Closed);
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read host events: {}", e);
                    let _ = tx.send(RouteEvent::Closed);
                    break;
                }
            }
        }
    });
}
