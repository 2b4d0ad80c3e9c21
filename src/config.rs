//! read configuration from a file or the environment

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::errors::Error;

pub const DEFAULT_REFRESH_PATH: &str = "/user/refresh-token";
pub const DEFAULT_LANDING_ROUTE: &str = "/";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    #[serde(default = "default_auth_failure_statuses")]
    pub auth_failure_statuses: Vec<u16>,
    #[serde(default = "default_landing_route")]
    pub landing_route: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub identity_path: Option<PathBuf>,
}

fn default_refresh_path() -> String {
    DEFAULT_REFRESH_PATH.to_string()
}

fn default_auth_failure_statuses() -> Vec<u16> {
    vec![403]
}

fn default_landing_route() -> String {
    DEFAULT_LANDING_ROUTE.to_string()
}

impl Config {
    /// Build a config with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_path: default_refresh_path(),
            auth_failure_statuses: default_auth_failure_statuses(),
            landing_route: default_landing_route(),
            timeout_secs: None,
            identity_path: None,
        }
    }

    pub fn from_values(
        base_url: impl Into<String>,
        refresh_path: Option<String>,
        auth_failure_statuses: Option<Vec<u16>>,
        landing_route: Option<String>,
        timeout_secs: Option<u64>,
        identity_path: Option<PathBuf>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_path: refresh_path.unwrap_or_else(default_refresh_path),
            auth_failure_statuses: auth_failure_statuses
                .unwrap_or_else(default_auth_failure_statuses),
            landing_route: landing_route.unwrap_or_else(default_landing_route),
            timeout_secs,
            identity_path,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// # ENV Vars
    /// * `MONEY_MANAGER_API_URL` - Base API root, e.g. `http://localhost:8080/api`
    /// * `MONEY_MANAGER_REFRESH_PATH` - Optional refresh endpoint path
    /// * `MONEY_MANAGER_AUTH_FAILURE_STATUSES` - Optional comma separated status list, e.g. `401,403`
    /// * `MONEY_MANAGER_LANDING_ROUTE` - Optional route handed to the session-expired handler
    /// * `MONEY_MANAGER_TIMEOUT_SECS` - Optional transport timeout
    /// * `MONEY_MANAGER_IDENTITY_PATH` - Optional file backing the identity cache
    pub fn from_env() -> Result<Self, Error> {
        let base_url = std::env::var("MONEY_MANAGER_API_URL")
            .map_err(|_| Error::Config("Missing MONEY_MANAGER_API_URL env var".to_string()))?;
        let statuses = match std::env::var("MONEY_MANAGER_AUTH_FAILURE_STATUSES") {
            Ok(raw) => Some(parse_status_list(&raw)?),
            Err(_) => None,
        };
        let timeout_secs = match std::env::var("MONEY_MANAGER_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("Invalid MONEY_MANAGER_TIMEOUT_SECS '{}': {}", raw, e))
            })?),
            Err(_) => None,
        };
        let config = Self::from_values(
            base_url,
            std::env::var("MONEY_MANAGER_REFRESH_PATH").ok(),
            statuses,
            std::env::var("MONEY_MANAGER_LANDING_ROUTE").ok(),
            timeout_secs,
            std::env::var("MONEY_MANAGER_IDENTITY_PATH")
                .ok()
                .map(PathBuf::from),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        Url::parse(&self.base_url).map_err(|e| {
            Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if self.auth_failure_statuses.is_empty() {
            return Err(Error::Config(
                "At least one auth failure status is required".to_string(),
            ));
        }
        for status in &self.auth_failure_statuses {
            if !(400..600).contains(status) {
                return Err(Error::Config(format!(
                    "Auth failure status {} is not a 4xx/5xx code",
                    status
                )));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn parse_status_list(raw: &str) -> Result<Vec<u16>, Error> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u16>()
                .map_err(|e| Error::Config(format!("Invalid status code '{}': {}", s, e)))
        })
        .collect()
}
