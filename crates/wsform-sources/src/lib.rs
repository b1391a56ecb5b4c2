//! Source contracts for the create-workspace form
//!
//! The form is populated from independent backends: a namespace source, a
//! workspace settings source and a devfile registry. Each is an async trait so
//! the orchestrator can be driven by real services or by test doubles. A
//! notification sink receives user-visible errors.

mod error;
mod local;
mod types;

pub use error::*;
pub use local::{ConfiguredNamespaces, LocalDevfileRegistry, SettingsFile, StderrNotifier};
pub use types::*;

use async_trait::async_trait;

/// Supplies the namespaces a workspace can be created in
#[async_trait]
pub trait NamespaceSource: Send + Sync {
    async fn fetch_namespaces(&self) -> Result<Vec<NamespaceInfo>>;
}

/// Supplies the workspace settings (which carry the devfile registry location)
#[async_trait]
pub trait WorkspaceSettingsSource: Send + Sync {
    async fn fetch_settings(&self) -> Result<WorkspaceSettings>;
}

/// Lists the devfile templates hosted at a registry location
#[async_trait]
pub trait DevfileSource: Send + Sync {
    /// `location` is never empty
    async fn fetch_devfiles(&self, location: &str) -> Result<Vec<DevfileTemplateInfo>>;
}

/// Fire-and-forget channel for user-visible errors
pub trait NotificationSink: Send + Sync {
    fn show_error(&self, message: &str);
}
