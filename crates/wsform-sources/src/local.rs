//! File-backed sources used by the CLI

use crate::{
    DevfileSource, DevfileTemplateInfo, NamespaceInfo, NamespaceSource, NotificationSink, Result,
    SourceError, WorkspaceSettings, WorkspaceSettingsSource,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Namespaces listed in the global config
pub struct ConfiguredNamespaces {
    namespaces: Vec<NamespaceInfo>,
}

impl ConfiguredNamespaces {
    pub fn new(namespaces: Vec<NamespaceInfo>) -> Self {
        Self { namespaces }
    }

    pub fn from_config(config: &wsform_config::GlobalConfig) -> Self {
        Self::new(config.namespaces.iter().map(NamespaceInfo::from).collect())
    }
}

#[async_trait]
impl NamespaceSource for ConfiguredNamespaces {
    async fn fetch_namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        Ok(self.namespaces.clone())
    }
}

/// Workspace settings stored as a flat JSON object
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl WorkspaceSettingsSource for SettingsFile {
    async fn fetch_settings(&self) -> Result<WorkspaceSettings> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SourceError::Unavailable(format!("settings file {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SourceError::Malformed(format!("settings file {}: {}", self.path.display(), e))
        })
    }
}

/// Devfile registry laid out on the local filesystem
///
/// The registry location is a directory path or a `file://` URL; its index is
/// read from `devfiles/index.json`.
#[derive(Default)]
pub struct LocalDevfileRegistry;

impl LocalDevfileRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Path of the index file for a registry location
    pub fn index_path(location: &str) -> Result<PathBuf> {
        let root = if let Some(path) = location.strip_prefix("file://") {
            path
        } else if location.contains("://") {
            return Err(SourceError::Unsupported(format!(
                "only local registries are supported, got {}",
                location
            )));
        } else {
            location
        };
        Ok(Path::new(root).join("devfiles").join("index.json"))
    }
}

#[async_trait]
impl DevfileSource for LocalDevfileRegistry {
    async fn fetch_devfiles(&self, location: &str) -> Result<Vec<DevfileTemplateInfo>> {
        let index = Self::index_path(location)?;
        tracing::debug!("Reading devfile index {:?}", index);

        let content = tokio::fs::read_to_string(&index).await.map_err(|e| {
            SourceError::Unavailable(format!("devfile index {}: {}", index.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SourceError::Malformed(format!("devfile index {}: {}", index.display(), e))
        })
    }
}

/// Prints notifications to stderr
#[derive(Default)]
pub struct StderrNotifier;

impl NotificationSink for StderrNotifier {
    fn show_error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}
