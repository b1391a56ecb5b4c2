//! Wiring and output helpers shared by the `wsform` binary

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use wsform_config::GlobalConfig;
use wsform_core::{Collaborators, CustomWorkspaceForm, FlowStatus, SelectField};
use wsform_sources::{ConfiguredNamespaces, LocalDevfileRegistry, SettingsFile, StderrNotifier};

/// Build the local sources described by `config`
pub fn local_collaborators(config: &GlobalConfig, config_dir: &Path) -> Collaborators {
    let settings_path = config.settings_path(config_dir);
    tracing::debug!("Using workspace settings from {:?}", settings_path);

    Collaborators {
        namespaces: Arc::new(ConfiguredNamespaces::from_config(config)),
        settings: Arc::new(SettingsFile::new(settings_path)),
        devfiles: Arc::new(LocalDevfileRegistry::new()),
        notifier: Arc::new(StderrNotifier),
    }
}

/// Selector contents as printed by `wsform show --json`
#[derive(Debug, Serialize)]
pub struct OptionsReport {
    pub namespaces: Option<SelectReport>,
    pub devfiles: Option<SelectReport>,
}

#[derive(Debug, Serialize)]
pub struct SelectReport {
    pub placeholder: String,
    pub options: Vec<String>,
    pub default: Option<String>,
    pub disabled: bool,
}

impl From<&SelectField> for SelectReport {
    fn from(select: &SelectField) -> Self {
        Self {
            placeholder: select.placeholder.clone(),
            options: select.options.options.clone(),
            default: select.options.default.clone(),
            disabled: select.options.disabled,
        }
    }
}

impl OptionsReport {
    pub fn from_form(form: &CustomWorkspaceForm) -> Self {
        Self {
            namespaces: form.namespace_select.as_ref().map(SelectReport::from),
            devfiles: form.devfile_select.as_ref().map(SelectReport::from),
        }
    }
}

/// Human readable listing of both selectors
pub fn render_text(form: &CustomWorkspaceForm) -> String {
    let mut out = String::new();
    render_select(&mut out, "Namespaces", form.namespace_select.as_ref(), form.namespace_status);
    out.push('\n');
    render_select(&mut out, "Devfiles", form.devfile_select.as_ref(), form.devfile_status);
    out
}

fn render_select(out: &mut String, title: &str, select: Option<&SelectField>, status: FlowStatus) {
    let select = match select {
        Some(s) => s,
        None => {
            let reason = match status {
                FlowStatus::Failed => "unavailable",
                _ => "not loaded",
            };
            out.push_str(&format!("{}: {}\n", title, reason));
            return;
        }
    };

    let suffix = if select.options.disabled { " (fixed)" } else { "" };
    out.push_str(&format!("{}{}:\n", title, suffix));
    if select.options.is_empty() {
        out.push_str("  (none)\n");
    }
    for option in &select.options.options {
        let marker = if select.options.default.as_deref() == Some(option.as_str()) {
            "*"
        } else {
            " "
        };
        out.push_str(&format!("  {} {}\n", marker, option));
    }
}
