//! Where a session's records come from.
//!
//! There is no backend. The mock source hands back the demo workspace after a
//! configurable pause so the loading state is visible; the file source reads a
//! JSON workspace once.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::{demo_workspace, Workspace};

#[async_trait]
pub trait LeadSource: Send + Sync {
    /// Short label for status lines ("demo data", a file path).
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Workspace>;
}

/// Demo data behind a simulated network delay.
pub struct MockLeadSource {
    latency: Duration,
}

impl MockLeadSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl LeadSource for MockLeadSource {
    fn describe(&self) -> String {
        "demo data".to_string()
    }

    async fn fetch(&self) -> Result<Workspace> {
        if !self.latency.is_zero() {
            tracing::debug!(latency_ms = self.latency.as_millis() as u64, "simulating fetch");
            tokio::time::sleep(self.latency).await;
        }
        Ok(demo_workspace())
    }
}

/// JSON workspace read from disk, optionally behind the same simulated delay.
pub struct FileLeadSource {
    path: PathBuf,
    latency: Duration,
}

impl FileLeadSource {
    pub fn new(path: PathBuf, latency: Duration) -> Self {
        Self { path, latency }
    }
}

#[async_trait]
impl LeadSource for FileLeadSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Workspace> {
        if !self.path.exists() {
            anyhow::bail!("File not found: {}", self.path.display());
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let workspace: Workspace = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid workspace file {}", self.path.display()))?;
        workspace
            .validate()
            .with_context(|| format!("Rejected workspace file {}", self.path.display()))?;

        tracing::info!(
            path = %self.path.display(),
            leads = workspace.leads.len(),
            "workspace loaded"
        );
        Ok(workspace)
    }
}
