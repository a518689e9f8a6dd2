use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BACKEND_ORIGIN: &str = "http://localhost:8000";

/// Environment variable that overrides the saved backend origin.
pub const BACKEND_ORIGIN_ENV: &str = "RESEARCH_BACKEND_ORIGIN";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Settings {
    /// Origin of the research backend, e.g. `https://research.example.com`.
    /// The WebSocket endpoint is derived from it on every submit.
    #[serde(default = "default_backend_origin")]
    pub backend_origin: String,
}

fn default_backend_origin() -> String {
    DEFAULT_BACKEND_ORIGIN.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_origin: default_backend_origin(),
        }
    }
}

impl Settings {
    /// Replaces the backend origin when `origin` is set and not blank.
    pub fn with_origin_override(mut self, origin: Option<String>) -> Self {
        if let Some(origin) = origin.map(|o| o.trim().to_string()).filter(|o| !o.is_empty()) {
            tracing::info!(%origin, "Backend origin overridden by {}.", BACKEND_ORIGIN_ENV);
            self.backend_origin = origin;
        }
        self
    }
}

pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    pub fn new(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    /// Loads saved settings, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(&self) -> Settings {
        if !self.settings_path.exists() {
            return Settings::default();
        }

        match fs::read_to_string(&self.settings_path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %self.settings_path.display(), "Ignoring unreadable settings: {}", e);
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(settings)?;
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.settings_path, content)
    }
}
