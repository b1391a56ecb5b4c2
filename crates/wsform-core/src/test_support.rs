//! Test support utilities for wsform-core
//!
//! Provides MockSources and RecordingNotifier for exercising the initializer
//! and the form without any backend.

use crate::Collaborators;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wsform_sources::*;

/// Records which methods were called on the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    FetchNamespaces,
    FetchSettings,
    FetchDevfiles { location: String },
}

/// Configurable mock implementing every source contract.
///
/// Defaults: no namespaces, settings without a registry location and an
/// empty template list.
pub struct MockSources {
    pub calls: Arc<Mutex<Vec<MockCall>>>,
    pub namespaces_result: Arc<Mutex<Result<Vec<NamespaceInfo>>>>,
    pub settings_result: Arc<Mutex<Result<WorkspaceSettings>>>,
    pub devfiles_result: Arc<Mutex<Result<Vec<DevfileTemplateInfo>>>>,
    /// When set, fetch_devfiles never resolves
    pub devfiles_blocked: Arc<AtomicBool>,
}

impl MockSources {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            namespaces_result: Arc::new(Mutex::new(Ok(Vec::new()))),
            settings_result: Arc::new(Mutex::new(Ok(WorkspaceSettings::default()))),
            devfiles_result: Arc::new(Mutex::new(Ok(Vec::new()))),
            devfiles_blocked: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mock whose settings point at `location`
    pub fn with_registry(location: &str) -> Self {
        let mock = Self::new();
        mock.set_settings(Ok(
            WorkspaceSettings::default().with_devfile_registry_url(location)
        ));
        mock
    }

    pub fn set_namespaces(&self, result: Result<Vec<NamespaceInfo>>) {
        *self.namespaces_result.lock().unwrap() = result;
    }

    pub fn set_settings(&self, result: Result<WorkspaceSettings>) {
        *self.settings_result.lock().unwrap() = result;
    }

    pub fn set_devfiles(&self, result: Result<Vec<DevfileTemplateInfo>>) {
        *self.devfiles_result.lock().unwrap() = result;
    }

    pub fn block_devfiles(&self) {
        self.devfiles_blocked.store(true, Ordering::SeqCst);
    }

    /// Wire this mock as every source, with `notifier` as the sink
    pub fn collaborators(self: &Arc<Self>, notifier: Arc<RecordingNotifier>) -> Collaborators {
        Collaborators {
            namespaces: self.clone(),
            settings: self.clone(),
            devfiles: self.clone(),
            notifier,
        }
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a specific call was made
    pub fn was_called(&self, call: &MockCall) -> bool {
        self.calls.lock().unwrap().contains(call)
    }
}

impl Default for MockSources {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to clone a Result<T> from an Arc<Mutex<Result<T>>>
fn clone_result<T: Clone>(r: &Arc<Mutex<Result<T>>>) -> Result<T> {
    let guard = r.lock().unwrap();
    match &*guard {
        Ok(v) => Ok(v.clone()),
        Err(e) => Err(clone_source_error(e)),
    }
}

/// Clone a SourceError (thiserror types don't implement Clone)
fn clone_source_error(e: &SourceError) -> SourceError {
    match e {
        SourceError::Unavailable(s) => SourceError::Unavailable(s.clone()),
        SourceError::Malformed(s) => SourceError::Malformed(s.clone()),
        SourceError::Unsupported(s) => SourceError::Unsupported(s.clone()),
        SourceError::Io(io) => SourceError::Unavailable(format!("IO error (cloned): {}", io)),
    }
}

#[async_trait]
impl NamespaceSource for MockSources {
    async fn fetch_namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        self.record(MockCall::FetchNamespaces);
        clone_result(&self.namespaces_result)
    }
}

#[async_trait]
impl WorkspaceSettingsSource for MockSources {
    async fn fetch_settings(&self) -> Result<WorkspaceSettings> {
        self.record(MockCall::FetchSettings);
        clone_result(&self.settings_result)
    }
}

#[async_trait]
impl DevfileSource for MockSources {
    async fn fetch_devfiles(&self, location: &str) -> Result<Vec<DevfileTemplateInfo>> {
        self.record(MockCall::FetchDevfiles {
            location: location.to_string(),
        });
        if self.devfiles_blocked.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        clone_result(&self.devfiles_result)
    }
}

/// Notification sink that keeps every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn show_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
