//! Application configuration.
//!
//! Read from `config.toml` in the platform config directory (or an explicit
//! path), with every field optional. `EVENT_PLANNER_API_URL` overrides the
//! store address.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::time_range::parse_time;
use crate::services::profile::SlotDefaults;

pub const API_URL_ENV: &str = "EVENT_PLANNER_API_URL";

const CONFIG_FILE_NAME: &str = "config.toml";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub session_file: Option<PathBuf>,
    pub calendar: CalendarConfig,
    pub availability: AvailabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 20,
            session_file: None,
            calendar: CalendarConfig::default(),
            availability: AvailabilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Longest title shown inside a day cell
    pub title_max_len: usize,
    /// Titles shown per day cell before "+N more"
    pub max_events_per_cell: usize,
    /// IANA zone used to decide which day an event falls on; system local
    /// time when unset
    pub timezone: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            title_max_len: 15,
            max_events_per_cell: 2,
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    pub default_start: String,
    pub default_end: String,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            default_start: "09:00".to_string(),
            default_end: "17:00".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `explicit`, else the default location, else defaults; then
    /// apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME)));

        let mut config = match path {
            Some(path) if explicit.is_some() || path.exists() => {
                log::info!("Loading config from: {}", path.display());
                Self::from_file(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?
            }
            _ => {
                log::info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        config.validate().context("Invalid configuration after overrides")?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                log::debug!("Using API URL from {}", API_URL_ENV);
                self.api_base_url = url.to_string();
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.calendar.title_max_len == 0 {
            return Err(ConfigError::Invalid(
                "calendar.title_max_len must be greater than 0".to_string(),
            ));
        }

        self.slot_defaults()?;
        self.timezone()?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Range given to newly added availability slots
    pub fn slot_defaults(&self) -> Result<SlotDefaults, ConfigError> {
        let start = parse_time(&self.availability.default_start).map_err(ConfigError::Invalid)?;
        let end = parse_time(&self.availability.default_end).map_err(ConfigError::Invalid)?;
        Ok(SlotDefaults { start, end })
    }

    /// Calendar zone, `None` meaning system local time
    pub fn timezone(&self) -> Result<Option<Tz>, ConfigError> {
        self.calendar
            .timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|_| ConfigError::Invalid(format!("Unknown timezone '{}'", name)))
            })
            .transpose()
    }

    /// Where the session record lives
    pub fn session_path(&self) -> PathBuf {
        if let Some(path) = &self.session_file {
            return path.clone();
        }

        if let Some(dirs) = project_dirs() {
            dirs.data_dir().join(SESSION_FILE_NAME)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for session");
            PathBuf::from(SESSION_FILE_NAME)
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("edu", "EventPlanner", "event-planner")
}
