//! Global configuration for wsform
//!
//! Located at `~/.config/wsform/config.toml`

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global wsform configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub form: FormLabels,
    pub settings: SettingsConfig,
    pub namespaces: Vec<NamespaceEntry>,
}

/// Static display strings for the form widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLabels {
    pub namespace_placeholder: String,
    pub devfile_placeholder: String,
    pub workspace_name_placeholder: String,
    pub devfile_url_placeholder: String,
    pub load_devfile_title: String,
}

impl Default for FormLabels {
    fn default() -> Self {
        Self {
            namespace_placeholder: "Select a namespace".to_string(),
            devfile_placeholder: "Select a devfile template".to_string(),
            workspace_name_placeholder: "Enter a workspace name".to_string(),
            devfile_url_placeholder: "URL of devfile".to_string(),
            load_devfile_title: "Load devfile".to_string(),
        }
    }
}

/// Where the workspace settings are read from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Path to the workspace settings JSON file.
    /// Defaults to `settings.json` next to the config file.
    pub path: Option<PathBuf>,
}

/// A namespace offered by the local namespace source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl GlobalConfig {
    /// Load global configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load global configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;

        tracing::debug!(
            "Loaded config from {:?}: {} namespace(s)",
            path,
            config.namespaces.len()
        );

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Reject namespace entries without a name
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.namespaces.iter().position(|ns| ns.name.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "namespace entry #{} has an empty name",
                pos + 1
            )));
        }
        Ok(())
    }

    /// Resolve the workspace settings file, relative paths are taken from `config_dir`
    pub fn settings_path(&self, config_dir: &Path) -> PathBuf {
        match &self.settings.path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => config_dir.join(p),
            None => config_dir.join("settings.json"),
        }
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "wsform").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GlobalConfig::default();
        assert!(config.namespaces.is_empty());
        assert_eq!(config.form.namespace_placeholder, "Select a namespace");
        assert_eq!(config.form.load_devfile_title, "Load devfile");
        assert!(config.settings.path.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[form]
namespace_placeholder = "Pick one"

[settings]
path = "/etc/wsform/settings.json"

[[namespaces]]
name = "user-che"
display_name = "User Che"
default = true

[[namespaces]]
name = "team"
"#;

        let config: GlobalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.form.namespace_placeholder, "Pick one");
        // unspecified labels keep their defaults
        assert_eq!(config.form.devfile_url_placeholder, "URL of devfile");
        assert_eq!(config.namespaces.len(), 2);
        assert!(config.namespaces[0].default);
        assert_eq!(config.namespaces[0].display_name.as_deref(), Some("User Che"));
        assert!(!config.namespaces[1].default);
        assert_eq!(
            config.settings_path(Path::new("/ignored")),
            PathBuf::from("/etc/wsform/settings.json")
        );
    }

    #[test]
    fn test_settings_path_defaults_next_to_config() {
        let config = GlobalConfig::default();
        assert_eq!(
            config.settings_path(Path::new("/home/u/.config/wsform")),
            PathBuf::from("/home/u/.config/wsform/settings.json")
        );

        let mut config = GlobalConfig::default();
        config.settings.path = Some(PathBuf::from("ws/settings.json"));
        assert_eq!(
            config.settings_path(Path::new("/cfg")),
            PathBuf::from("/cfg/ws/settings.json")
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GlobalConfig::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert!(config.namespaces.is_empty());
    }

    #[test]
    fn test_load_rejects_empty_namespace_name() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[[namespaces]]\nname = \"  \"\n").unwrap();

        let err = GlobalConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/config.toml");

        let mut config = GlobalConfig::default();
        config.namespaces.push(NamespaceEntry {
            name: "dev".to_string(),
            display_name: None,
            default: true,
            phase: Some("Active".to_string()),
        });
        config.save_to(&path).unwrap();

        let loaded = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(loaded.namespaces, config.namespaces);
        assert_eq!(loaded.form, FormLabels::default());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[[namespaces]\nname=").unwrap();

        let err = GlobalConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseError { .. }));
    }
}
