use crate::errors::SwanError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SWAN_API: &str = "https://orchestrator-api.swanchain.io";
pub const SWAN_API_ENV: &str = "SWAN_API";
pub const SWAN_API_TIMEOUT_SECS_ENV: &str = "SWAN_API_TIMEOUT_SECS";

const MACHINES_PATH: &str = "cp/machines";
const PROVIDERS_PATH: &str = "cp/providers";

/// Where the client talks to. Injected into [`crate::CpClient`] rather than
/// read from a process-wide constant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwanConfig {
    pub api_base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for SwanConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_SWAN_API.to_string(),
            timeout: None,
        }
    }
}

impl SwanConfig {
    pub fn new(api_base_url: impl Into<String>) -> Result<Self, SwanError> {
        let api_base_url = api_base_url.into();
        let trimmed = api_base_url.trim();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(SwanError::InvalidConfig(format!(
                "api base url must start with http:// or https://, got: {api_base_url}"
            )));
        }
        Ok(Self {
            api_base_url: trimmed.trim_end_matches('/').to_string(),
            timeout: None,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `SWAN_API` and `SWAN_API_TIMEOUT_SECS`. Blank values fall back to
    /// the defaults.
    pub fn from_env() -> Result<Self, SwanError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, SwanError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(SWAN_API_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SWAN_API.to_string());
        let mut config = Self::new(base_url)?;

        if let Some(raw) = lookup(SWAN_API_TIMEOUT_SECS_ENV).filter(|value| !value.trim().is_empty())
        {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                SwanError::InvalidConfig(format!(
                    "{SWAN_API_TIMEOUT_SECS_ENV} must be a whole number of seconds, got: {raw}"
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn machines_url(&self) -> String {
        self.endpoint(MACHINES_PATH)
    }

    pub fn providers_url(&self) -> String {
        self.endpoint(PROVIDERS_PATH)
    }

    pub fn detail_url(&self, cp_id: &str) -> String {
        format!("{}/{cp_id}", self.api_base_url.trim_end_matches('/'))
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
