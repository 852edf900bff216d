use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use super::forms::FormDefinition;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub confirmation: ConfirmationConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Custom forms, looked up by name before the built-in presets
    #[serde(default)]
    pub forms: Vec<FormDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Word the user must type before a destructive action is dispatched
    pub literal: String,
    /// Compare the typed word ignoring case
    pub case_insensitive: bool,
    /// Talking points shown in the reconsider modal
    pub reconsider_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Delay before every toast is removed
    pub auto_dismiss_ms: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            literal: "DELETE".to_string(),
            case_insensitive: true,
            reconsider_points: vec![
                "This post has valuable engagement metrics".to_string(),
                "There might be important user comments".to_string(),
                "External websites could be linking to it".to_string(),
                "You can edit instead of deleting".to_string(),
            ],
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 3000,
        }
    }
}

impl NotificationConfig {
    pub fn auto_dismiss(&self) -> Duration {
        Duration::from_millis(self.auto_dismiss_ms)
    }
}

impl GuardConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config: GuardConfig = serde_yaml::from_str(&content)
            .context(format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if file doesn't exist
    pub fn load_or_default(path: Option<&PathBuf>) -> anyhow::Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            _ => Ok(Self::default()),
        }
    }

    /// Default config location: ~/.config/post-guard/config.yaml
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("post-guard").join("config.yaml"))
    }
}
