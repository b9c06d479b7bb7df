//! Configuration settings for Recap.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Ollama endpoint.
pub const DEFAULT_BACKEND_HOST: &str = "http://localhost:11434";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub backend: BackendSettings,
    pub youtube: YoutubeSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Root directory holding one transcript directory per playlist.
    pub transcripts_dir: String,
    /// Root directory holding one summary directory per playlist.
    pub summaries_dir: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            transcripts_dir: "transcripts".to_string(),
            summaries_dir: "summaries".to_string(),
        }
    }
}

/// Completion backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the backend (an Ollama host or any OpenAI-compatible server).
    pub host: Option<String>,
    /// API key, if the backend requires one.
    pub api_key: Option<String>,
    /// Model used when none is given on the command line.
    pub default_model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            host: None,
            api_key: None,
            default_model: "gemma3:4b".to_string(),
            timeout_secs: 300,
        }
    }
}

impl BackendSettings {
    /// The configured host, or the local Ollama default.
    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(DEFAULT_BACKEND_HOST)
    }
}

/// YouTube-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Subtitle languages passed to yt-dlp (`--sub-langs`).
    pub subtitle_langs: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            subtitle_langs: "en.*,en".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Environment overrides are applied on top of the file contents.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply backend overrides from a variable lookup.
    ///
    /// Recognizes `OLLAMA_HOST`, `OLLAMA_API_KEY` and `DEFAULT_MODEL`, each also
    /// accepted with a `RECAP_` prefix (which wins). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("RECAP_{}", name))
                .or_else(|| lookup(name))
                .filter(|v| !v.trim().is_empty())
        };

        if let Some(host) = get("OLLAMA_HOST") {
            self.backend.host = Some(host);
        }
        if let Some(key) = get("OLLAMA_API_KEY") {
            self.backend.api_key = Some(key);
        }
        if let Some(model) = get("DEFAULT_MODEL") {
            self.backend.default_model = model;
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::RecapError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recap")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded transcripts directory path.
    pub fn transcripts_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.transcripts_dir)
    }

    /// Get the expanded summaries directory path.
    pub fn summaries_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.summaries_dir)
    }
}
