use std::env;
use std::time::Duration;

use crate::domain::board::{GroupBy, SortBy};
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "https://api.quicksell.co/v1/internal/frontend-assignment";

pub const ENV_API_URL: &str = "KANBAN_API_URL";
pub const ENV_GROUP_BY: &str = "KANBAN_GROUP_BY";
pub const ENV_SORT_BY: &str = "KANBAN_SORT_BY";
pub const ENV_TIMEOUT_SECS: &str = "KANBAN_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub group_by: GroupBy,
    pub sort_by: SortBy,
    /// No timeout when unset.
    pub timeout: Option<Duration>,
}

/// Command line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub group_by: Option<String>,
    pub sort_by: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            group_by: GroupBy::default(),
            sort_by: SortBy::default(),
            timeout: None,
        }
    }
}

impl AppConfig {
    pub fn load(overrides: ConfigOverrides) -> AppResult<Self> {
        Self::load_from(|key| env::var(key).ok(), overrides)
    }

    pub fn load_from<F>(lookup: F, overrides: ConfigOverrides) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api_url = url;
        }
        if let Some(value) = lookup(ENV_GROUP_BY) {
            config.group_by = GroupBy::parse(&value);
        }
        if let Some(value) = lookup(ENV_SORT_BY) {
            config.sort_by = SortBy::parse(&value);
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            let secs = value.trim().parse::<u64>().map_err(|_| {
                AppError::Configuration(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{value}'"
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(url) = overrides.api_url {
            config.api_url = url;
        }
        if let Some(value) = overrides.group_by {
            config.group_by = GroupBy::parse(&value);
        }
        if let Some(value) = overrides.sort_by {
            config.sort_by = SortBy::parse(&value);
        }
        if let Some(secs) = overrides.timeout_secs {
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.api_url = config.api_url.trim().to_string();
        if config.api_url.is_empty() {
            return Err(AppError::Configuration(
                "ticket API URL must not be empty".to_string(),
            ));
        }

        Ok(config)
    }
}
