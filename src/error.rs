//! Error types for the event planner core.

use thiserror::Error;

/// Problems caught locally, before anything is sent to the remote store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one interest is required")]
    InterestsRequired,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("End time must be after start time")]
    EndBeforeStart,
}

/// Failures talking to the remote store.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed with HTTP status {status}{}", detail_suffix(.detail))]
    Http { status: u16, detail: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Not signed in")]
    Unauthenticated,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl ApiError {
    /// Message suitable for showing to the user: the server's own detail when
    /// it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Session token and persisted identity problems.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Malformed session token: {0}")]
    MalformedToken(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Session data could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
