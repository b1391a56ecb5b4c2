//! State of the create-workspace form
//!
//! The form owns one value object per widget. User input arrives as
//! [`FormEvent`]s through [`CustomWorkspaceForm::apply`], and fetched options
//! arrive as [`FlowOutcome`]s through [`CustomWorkspaceForm::apply_outcome`].
//! Applied events are forwarded to an optional subscriber so callers can
//! observe selections without a UI.

use crate::init::{FlowOutcome, Initializer};
use crate::selection::DisplayOptionSet;
use crate::{CoreError, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use wsform_config::FormLabels;

/// User interaction with one of the form widgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    NamespaceSelected(String),
    DevfileSelected(String),
    WorkspaceNameChanged(String),
    TemporaryStorageToggled(bool),
    DevfileUrlChanged(String),
    LoadDevfileClicked,
}

/// Progress of one initialization flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStatus {
    Pending,
    Built,
    Failed,
}

/// A text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub name: &'static str,
    pub placeholder: String,
    value: String,
}

impl TextField {
    pub fn new(name: &'static str, placeholder: impl Into<String>) -> Self {
        Self {
            name,
            placeholder: placeholder.into(),
            value: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

/// An on/off switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleField {
    pub name: &'static str,
    value: bool,
}

impl ToggleField {
    pub fn new(name: &'static str) -> Self {
        Self { name, value: false }
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

/// A clickable action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub title: String,
    pub disabled: bool,
}

/// A single-choice selector backed by a [`DisplayOptionSet`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub placeholder: String,
    pub options: DisplayOptionSet,
    selected: Option<String>,
}

impl SelectField {
    pub fn new(options: DisplayOptionSet, placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            selected: options.default.clone(),
            options,
        }
    }

    /// Current choice, starts out as the option set's default
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

/// Form values retained for submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkspaceFormValues {
    pub namespace: Option<String>,
    pub devfile: Option<String>,
    pub workspace_name: String,
    pub temporary_storage: bool,
    pub devfile_url: String,
}

/// The create-workspace-from-template form
pub struct CustomWorkspaceForm {
    labels: FormLabels,
    pub namespace_select: Option<SelectField>,
    pub devfile_select: Option<SelectField>,
    pub workspace_name: TextField,
    pub temporary_storage: ToggleField,
    pub devfile_url: TextField,
    pub load_devfile: ActionButton,
    pub namespace_status: FlowStatus,
    pub devfile_status: FlowStatus,
    subscriber: Option<mpsc::UnboundedSender<FormEvent>>,
}

impl CustomWorkspaceForm {
    pub fn new(labels: FormLabels) -> Self {
        Self {
            namespace_select: None,
            devfile_select: None,
            workspace_name: TextField::new(
                "workspaceName",
                labels.workspace_name_placeholder.as_str(),
            ),
            temporary_storage: ToggleField::new("temporaryStorage"),
            devfile_url: TextField::new("devfileUrl", labels.devfile_url_placeholder.as_str()),
            load_devfile: ActionButton {
                title: labels.load_devfile_title.clone(),
                disabled: true,
            },
            namespace_status: FlowStatus::Pending,
            devfile_status: FlowStatus::Pending,
            subscriber: None,
            labels,
        }
    }

    /// Receive every event accepted by [`apply`](Self::apply) from now on.
    /// A later call replaces the previous subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<FormEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscriber = Some(tx);
        rx
    }

    /// Apply a user event. Returns false when the event was ignored.
    pub fn apply(&mut self, event: FormEvent) -> bool {
        let accepted = match &event {
            FormEvent::NamespaceSelected(value) => {
                select_value(self.namespace_select.as_mut(), value, "namespace")
            }
            FormEvent::DevfileSelected(value) => {
                select_value(self.devfile_select.as_mut(), value, "devfile")
            }
            FormEvent::WorkspaceNameChanged(value) => {
                self.workspace_name.set_value(value.clone());
                true
            }
            FormEvent::TemporaryStorageToggled(value) => {
                self.temporary_storage.value = *value;
                true
            }
            FormEvent::DevfileUrlChanged(value) => {
                self.devfile_url.set_value(value.clone());
                self.load_devfile.disabled = self.devfile_url.is_empty();
                true
            }
            FormEvent::LoadDevfileClicked => {
                if self.load_devfile.disabled {
                    tracing::debug!("Ignoring load devfile click, no devfile URL entered");
                }
                !self.load_devfile.disabled
            }
        };

        if accepted {
            if let Some(tx) = &self.subscriber {
                // receiver may be gone, events are fire-and-forget
                let _ = tx.send(event);
            }
        }
        accepted
    }

    /// Store the result of a finished flow.
    ///
    /// A failed namespace flow is returned as an error. A failed devfile flow
    /// has already been reported by the flow itself and leaves the devfile
    /// selector unset.
    pub fn apply_outcome(&mut self, outcome: FlowOutcome) -> Result<()> {
        match outcome {
            FlowOutcome::Namespaces(Ok(options)) => {
                self.namespace_select = Some(SelectField::new(
                    options,
                    self.labels.namespace_placeholder.as_str(),
                ));
                self.namespace_status = FlowStatus::Built;
            }
            FlowOutcome::Namespaces(Err(e)) => {
                self.namespace_status = FlowStatus::Failed;
                return Err(CoreError::Source(e));
            }
            FlowOutcome::Devfiles(Ok(options)) => {
                self.devfile_select = Some(SelectField::new(
                    options,
                    self.labels.devfile_placeholder.as_str(),
                ));
                self.devfile_status = FlowStatus::Built;
            }
            FlowOutcome::Devfiles(Err(_)) => {
                self.devfile_status = FlowStatus::Failed;
            }
        }
        Ok(())
    }

    /// Run both flows to completion and apply their outcomes.
    ///
    /// The devfile outcome is always applied, even when the namespace flow
    /// fails; the namespace error is returned afterwards.
    pub async fn initialize(&mut self, initializer: &Initializer) -> Result<()> {
        let mut handle = initializer.start();
        let mut namespace_error = None;

        while let Some(outcome) = handle.next_outcome().await {
            if let Err(e) = self.apply_outcome(outcome) {
                namespace_error = Some(e);
            }
        }

        if let Some(e) = namespace_error {
            return Err(e);
        }
        if self.namespace_status == FlowStatus::Pending
            || self.devfile_status == FlowStatus::Pending
        {
            return Err(CoreError::TaskFailed(
                "initialization flow ended without reporting".to_string(),
            ));
        }
        Ok(())
    }

    pub fn values(&self) -> WorkspaceFormValues {
        WorkspaceFormValues {
            namespace: self
                .namespace_select
                .as_ref()
                .and_then(|s| s.selected().map(str::to_string)),
            devfile: self
                .devfile_select
                .as_ref()
                .and_then(|s| s.selected().map(str::to_string)),
            workspace_name: self.workspace_name.value().to_string(),
            temporary_storage: self.temporary_storage.value(),
            devfile_url: self.devfile_url.value().to_string(),
        }
    }
}

fn select_value(select: Option<&mut SelectField>, value: &str, which: &str) -> bool {
    match select {
        Some(select) => {
            select.selected = Some(value.to_string());
            true
        }
        None => {
            tracing::debug!("Ignoring {} selection, selector not populated", which);
            false
        }
    }
}
