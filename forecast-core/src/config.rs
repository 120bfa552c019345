use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const SERVICE_URL_ENV: &str = "FORECAST_SERVICE_URL";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How forecast rows are laid out in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Table => "table",
            ViewMode::Cards => "cards",
        }
    }

    pub const fn all() -> &'static [ViewMode] {
        &[ViewMode::Table, ViewMode::Cards]
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ViewMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "table" => Ok(ViewMode::Table),
            "cards" => Ok(ViewMode::Cards),
            _ => Err(anyhow!("Unknown view '{value}'. Supported views: table, cards.")),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// service_url = "http://localhost:8000"
/// default_view = "cards"
/// export_dir = "/home/me/reports"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Base URL of the prediction service.
    pub service_url: Option<String>,

    /// "table" or "cards".
    pub default_view: Option<String>,

    /// Where exported PDF reports are written.
    pub export_dir: Option<PathBuf>,

    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Service URL, with the environment variable taking precedence.
    pub fn service_url(&self) -> String {
        resolve_service_url(std::env::var(SERVICE_URL_ENV).ok(), self.service_url.as_deref())
    }

    pub fn default_view(&self) -> Result<ViewMode> {
        match &self.default_view {
            Some(view) => ViewMode::try_from(view.as_str()),
            None => Ok(ViewMode::default()),
        }
    }

    pub fn set_default_view(&mut self, view: ViewMode) {
        self.default_view = Some(view.as_str().to_string());
    }

    /// Export directory, falling back to the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast-report", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn resolve_service_url(env: Option<String>, stored: Option<&str>) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| stored.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
}
