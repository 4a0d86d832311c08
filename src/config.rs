use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Client configuration at ~/.config/planner/config.toml
///
/// `--server` / `PLANNER_URL` take precedence over the file.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            server_url: default_server_url(),
        }
    }
}

impl CliConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("planner");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Server URL to talk to: the command-line/env override if given, else the file.
    pub fn server_url(&self, override_url: Option<&str>) -> String {
        override_url
            .map(str::to_string)
            .unwrap_or_else(|| self.server_url.clone())
    }
}
