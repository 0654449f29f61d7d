//! Installs CustomResourceDefinitions into the cluster
//!
//! Uses server-side apply so repeated installs converge, then waits for
//! the API server to report each definition as Established.

use std::time::Duration;

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::{Api, Patch, PatchParams};
use kube::runtime::wait::{await_condition, conditions};
use kube::Client;
use tracing::{debug, info};

use crate::error::{Error, Result};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the installer
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Field manager recorded for server-side apply
    pub field_manager: String,
    /// Validate on the server without persisting
    pub dry_run: bool,
    /// How long to wait for each CRD to become Established
    pub establish_timeout: Duration,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            field_manager: crate::NAME.to_string(),
            dry_run: false,
            establish_timeout: Duration::from_secs(60),
        }
    }
}

impl InstallerConfig {
    /// Patch parameters for applying a definition
    pub fn patch_params(&self) -> PatchParams {
        let mut params = PatchParams::apply(&self.field_manager).force();
        params.dry_run = self.dry_run;
        params
    }
}

// =============================================================================
// Installer
// =============================================================================

/// Applies CRDs through the Kubernetes API
pub struct CrdInstaller {
    api: Api<CustomResourceDefinition>,
    config: InstallerConfig,
}

impl CrdInstaller {
    pub fn new(client: Client, config: InstallerConfig) -> Self {
        Self {
            api: Api::all(client),
            config,
        }
    }

    /// Server-side apply a single definition
    pub async fn apply(&self, crd: &CustomResourceDefinition) -> Result<CustomResourceDefinition> {
        let name = crd.metadata.name.as_deref().ok_or_else(|| {
            Error::Configuration("CustomResourceDefinition without metadata.name".to_string())
        })?;

        debug!(%name, dry_run = self.config.dry_run, "Applying CRD");
        let applied = self
            .api
            .patch(name, &self.config.patch_params(), &Patch::Apply(crd))
            .await?;
        info!(%name, dry_run = self.config.dry_run, "Applied CRD");
        Ok(applied)
    }

    /// Wait until the named definition reports Established
    pub async fn wait_established(&self, name: &str) -> Result<()> {
        let waiter = await_condition(self.api.clone(), name, conditions::is_crd_established());
        tokio::time::timeout(self.config.establish_timeout, waiter)
            .await
            .map_err(|_elapsed| Error::Timeout {
                kind: "CustomResourceDefinition".to_string(),
                name: name.to_string(),
            })??;

        info!(%name, "CRD established");
        Ok(())
    }

    /// Apply every definition in order, then wait for each unless dry-run
    pub async fn install_all(&self, crds: &[CustomResourceDefinition]) -> Result<()> {
        let mut names = Vec::with_capacity(crds.len());
        for crd in crds {
            let applied = self.apply(crd).await?;
            if let Some(name) = applied.metadata.name {
                names.push(name);
            }
        }

        if self.config.dry_run {
            info!(count = crds.len(), "Dry run complete, nothing persisted");
            return Ok(());
        }

        for name in &names {
            self.wait_established(name).await?;
        }
        info!(count = names.len(), "All CRDs installed");
        Ok(())
    }
}
