//! Deployment variant detection
//!
//! The variant is resolved at most once per provider: the first caller fetches the server
//! descriptor and every later caller sees the stored value. A failed lookup is stored as
//! `Unknown` and never retried.

use qahelper_core::models::DeploymentType;
use qahelper_jira::TrackerApi;
use tokio::sync::OnceCell;

pub struct DeploymentProvider {
    cell: OnceCell<DeploymentType>,
}

impl DeploymentProvider {
    /// Provider that detects the variant on first use
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Provider seeded with a known variant; no detection request is made
    pub fn fixed(deployment: DeploymentType) -> Self {
        Self {
            cell: OnceCell::new_with(Some(deployment)),
        }
    }

    pub fn cached(&self) -> Option<DeploymentType> {
        self.cell.get().copied()
    }

    pub async fn get(&self, api: &dyn TrackerApi) -> DeploymentType {
        *self
            .cell
            .get_or_init(|| async {
                match api.get_server_info().await {
                    Ok(info) => {
                        let deployment =
                            DeploymentType::from_descriptor(info.deployment_type.as_deref());
                        tracing::info!("Detected deployment type: {}", deployment);
                        deployment
                    }
                    Err(e) => {
                        tracing::warn!("Deployment detection failed, using unknown: {}", e);
                        DeploymentType::Unknown
                    }
                }
            })
            .await
    }
}

impl Default for DeploymentProvider {
    fn default() -> Self {
        Self::new()
    }
}
