//! Initialization of the selector options
//!
//! Two flows run concurrently as tokio tasks:
//! - namespaces: fetch, then build the namespace options
//! - devfiles: fetch settings, resolve the registry location, fetch the
//!   templates, then build the devfile options
//!
//! Each flow reports a single [`FlowOutcome`] over a channel to whoever owns
//! the form. Dropping the [`InitHandle`] aborts flows that are still running.

use crate::selection::{build_devfile_options, build_namespace_options, DisplayOptionSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use wsform_sources::{
    DevfileSource, NamespaceSource, NotificationSink, SourceError, WorkspaceSettingsSource,
};

/// Message shown and logged when the devfile selector cannot be populated
pub const DEVFILE_REGISTRY_ERROR: &str = "Failed to load the devfile registry URL.";

/// Why the devfile flow ended in its failed state
#[derive(Error, Debug)]
pub enum DevfileFlowError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[source] SourceError),

    #[error("no devfile registry location configured")]
    MisconfiguredRegistry,
}

/// Result reported by a finished flow
#[derive(Debug)]
pub enum FlowOutcome {
    Namespaces(std::result::Result<DisplayOptionSet, SourceError>),
    Devfiles(std::result::Result<DisplayOptionSet, DevfileFlowError>),
}

/// Handles to the services the form is populated from
#[derive(Clone)]
pub struct Collaborators {
    pub namespaces: Arc<dyn NamespaceSource>,
    pub settings: Arc<dyn WorkspaceSettingsSource>,
    pub devfiles: Arc<dyn DevfileSource>,
    pub notifier: Arc<dyn NotificationSink>,
}

/// Starts the namespace and devfile flows
#[derive(Clone)]
pub struct Initializer {
    collaborators: Collaborators,
}

impl Initializer {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    /// Spawn both flows. Must be called within a tokio runtime.
    pub fn start(&self) -> InitHandle {
        let (tx, rx) = mpsc::unbounded_channel();

        let namespaces = Arc::clone(&self.collaborators.namespaces);
        let namespace_tx = tx.clone();
        let namespace_task = tokio::spawn(async move {
            let outcome = namespace_flow(namespaces.as_ref()).await;
            let _ = namespace_tx.send(FlowOutcome::Namespaces(outcome));
        });

        let settings = Arc::clone(&self.collaborators.settings);
        let devfiles = Arc::clone(&self.collaborators.devfiles);
        let notifier = Arc::clone(&self.collaborators.notifier);
        let devfile_task = tokio::spawn(async move {
            let outcome = devfile_flow(settings.as_ref(), devfiles.as_ref()).await;
            if let Err(ref e) = outcome {
                report_devfile_failure(notifier.as_ref(), e);
            }
            let _ = tx.send(FlowOutcome::Devfiles(outcome));
        });

        InitHandle {
            rx,
            namespace_task,
            devfile_task,
        }
    }
}

/// Running initialization; aborts unfinished flows when cancelled or dropped
pub struct InitHandle {
    rx: mpsc::UnboundedReceiver<FlowOutcome>,
    namespace_task: JoinHandle<()>,
    devfile_task: JoinHandle<()>,
}

impl InitHandle {
    /// Next outcome in completion order, `None` once both flows have ended
    pub async fn next_outcome(&mut self) -> Option<FlowOutcome> {
        self.rx.recv().await
    }

    /// Abort both flows. Outcomes not yet received are discarded.
    pub fn cancel(&mut self) {
        self.namespace_task.abort();
        self.devfile_task.abort();
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
    }
}

impl Drop for InitHandle {
    fn drop(&mut self) {
        self.namespace_task.abort();
        self.devfile_task.abort();
    }
}

/// Fetch namespaces and build their options. Fetch errors are returned as-is.
pub async fn namespace_flow(
    source: &dyn NamespaceSource,
) -> std::result::Result<DisplayOptionSet, SourceError> {
    let namespaces = source.fetch_namespaces().await?;
    tracing::debug!("Fetched {} namespace(s)", namespaces.len());
    Ok(build_namespace_options(&namespaces))
}

/// Resolve the registry from the settings and build the devfile options.
///
/// No template fetch is attempted when the settings carry no registry location.
pub async fn devfile_flow(
    settings: &dyn WorkspaceSettingsSource,
    devfiles: &dyn DevfileSource,
) -> std::result::Result<DisplayOptionSet, DevfileFlowError> {
    let settings = settings
        .fetch_settings()
        .await
        .map_err(DevfileFlowError::SourceUnavailable)?;
    tracing::debug!("Workspace settings fetched");

    let location = settings
        .devfile_registry_url()
        .ok_or(DevfileFlowError::MisconfiguredRegistry)?;
    tracing::debug!("Devfile registry resolved: {}", location);

    let templates = devfiles
        .fetch_devfiles(location)
        .await
        .map_err(DevfileFlowError::SourceUnavailable)?;
    tracing::debug!("Fetched {} devfile template(s)", templates.len());

    Ok(build_devfile_options(&templates))
}

fn report_devfile_failure(notifier: &dyn NotificationSink, error: &DevfileFlowError) {
    tracing::debug!("Devfile flow failed: {}", error);
    notifier.show_error(DEVFILE_REGISTRY_ERROR);
    tracing::error!("{}", DEVFILE_REGISTRY_ERROR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockCall, MockSources, RecordingNotifier};
    use wsform_sources::{DevfileTemplateInfo, NamespaceInfo, WorkspaceSettings};

    #[tokio::test]
    async fn test_namespace_flow_builds_options() {
        let mock = MockSources::new();
        mock.set_namespaces(Ok(vec![
            NamespaceInfo::new("b"),
            NamespaceInfo::new("a").as_default(),
        ]));

        let set = namespace_flow(&mock).await.unwrap();
        assert_eq!(set.options, vec!["a", "b"]);
        assert_eq!(set.default.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_namespace_flow_returns_fetch_error() {
        let mock = MockSources::new();
        mock.set_namespaces(Err(SourceError::Unavailable("down".into())));

        let err = namespace_flow(&mock).await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_devfile_flow_short_circuits_without_registry() {
        let mock = MockSources::new();
        mock.set_settings(Ok(WorkspaceSettings::default()));

        let err = devfile_flow(&mock, &mock).await.unwrap_err();
        assert!(matches!(err, DevfileFlowError::MisconfiguredRegistry));
        assert_eq!(mock.get_calls(), vec![MockCall::FetchSettings]);
    }

    #[tokio::test]
    async fn test_devfile_flow_settings_failure() {
        let mock = MockSources::new();
        mock.set_settings(Err(SourceError::Unavailable("503".into())));

        let err = devfile_flow(&mock, &mock).await.unwrap_err();
        assert!(matches!(err, DevfileFlowError::SourceUnavailable(_)));
        assert_eq!(mock.get_calls(), vec![MockCall::FetchSettings]);
    }

    #[tokio::test]
    async fn test_devfile_flow_uses_resolved_location() {
        let mock = MockSources::new();
        mock.set_settings(Ok(
            WorkspaceSettings::default().with_devfile_registry_url("https://registry")
        ));
        mock.set_devfiles(Ok(vec![DevfileTemplateInfo::new("Go")]));

        let set = devfile_flow(&mock, &mock).await.unwrap();
        assert_eq!(set.options, vec!["Go"]);
        assert!(mock.was_called(&MockCall::FetchDevfiles {
            location: "https://registry".to_string()
        }));
    }

    #[tokio::test]
    async fn test_start_reports_both_outcomes() {
        let mock = Arc::new(MockSources::with_registry("https://registry"));
        let notifier = Arc::new(RecordingNotifier::new());
        let initializer = Initializer::new(mock.collaborators(notifier.clone()));

        let mut handle = initializer.start();
        let mut namespaces = false;
        let mut devfiles = false;
        while let Some(outcome) = handle.next_outcome().await {
            match outcome {
                FlowOutcome::Namespaces(r) => namespaces = r.is_ok(),
                FlowOutcome::Devfiles(r) => devfiles = r.is_ok(),
            }
        }
        assert!(namespaces && devfiles);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_failed_devfile_flow_notifies_once() {
        let mock = Arc::new(MockSources::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut handle = Initializer::new(mock.collaborators(notifier.clone())).start();
        while handle.next_outcome().await.is_some() {}

        assert_eq!(notifier.messages(), vec![DEVFILE_REGISTRY_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn test_cancel_discards_pending_flow() {
        let mock = Arc::new(MockSources::with_registry("https://registry"));
        mock.block_devfiles();
        let notifier = Arc::new(RecordingNotifier::new());
        let mut handle = Initializer::new(mock.collaborators(notifier.clone())).start();

        match handle.next_outcome().await {
            Some(FlowOutcome::Namespaces(r)) => assert!(r.is_ok()),
            other => panic!("expected namespace outcome, got {:?}", other),
        }

        handle.cancel();
        assert!(handle.next_outcome().await.is_none());
        assert!(notifier.messages().is_empty());
    }
}
