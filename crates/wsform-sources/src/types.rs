//! Entities handed out by the sources

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Settings key holding the devfile registry location
pub const DEVFILE_REGISTRY_URL_KEY: &str = "cheWorkspaceDevfileRegistryUrl";

/// A namespace a workspace can be created in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub name: String,
    #[serde(default)]
    pub attributes: NamespaceAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceAttributes {
    #[serde(default)]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl NamespaceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: NamespaceAttributes::default(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.attributes.display_name = Some(display_name.into());
        self
    }

    pub fn as_default(mut self) -> Self {
        self.attributes.default = true;
        self
    }

    pub fn is_default(&self) -> bool {
        self.attributes.default
    }

    /// Display name if set and non-empty, otherwise the technical name
    pub fn display_label(&self) -> &str {
        match self.attributes.display_name.as_deref() {
            Some(display) if !display.is_empty() => display,
            _ => &self.name,
        }
    }
}

impl From<&wsform_config::NamespaceEntry> for NamespaceInfo {
    fn from(entry: &wsform_config::NamespaceEntry) -> Self {
        Self {
            name: entry.name.clone(),
            attributes: NamespaceAttributes {
                default: entry.default,
                display_name: entry.display_name.clone(),
                phase: entry.phase.clone(),
            },
        }
    }
}

/// Metadata of a devfile template listed by a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevfileTemplateInfo {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_memory_limit: Option<String>,
    #[serde(default)]
    pub links: DevfileLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevfileLinks {
    /// Template location relative to the registry
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

impl DevfileTemplateInfo {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            description: None,
            icon: None,
            global_memory_limit: None,
            links: DevfileLinks::default(),
        }
    }
}

/// Workspace settings as served by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceSettings(pub HashMap<String, String>);

impl WorkspaceSettings {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Registry location, `None` when absent or empty
    pub fn devfile_registry_url(&self) -> Option<&str> {
        self.get(DEVFILE_REGISTRY_URL_KEY).filter(|url| !url.is_empty())
    }

    pub fn with_devfile_registry_url(mut self, url: impl Into<String>) -> Self {
        self.0.insert(DEVFILE_REGISTRY_URL_KEY.to_string(), url.into());
        self
    }
}
