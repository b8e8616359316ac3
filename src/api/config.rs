//! API endpoint configuration. The base URL defaults to a local backend and can
//! be overridden from `SMARTCLAIM_API_BASE_URL` or from command-line options.
//! Configuration values are public; do not store secrets here.

use super::errors::AppError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const ENV_API_BASE_URL: &str = "SMARTCLAIM_API_BASE_URL";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for the SmartClaim REST API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: crate::APP_USER_AGENT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads config from the environment on top of the defaults.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        let overrides = Overrides {
            api_base_url: std::env::var(ENV_API_BASE_URL)
                .ok()
                .and_then(|value| normalize_value(&value)),
            timeout: None,
        };
        apply_overrides(&mut config, overrides);
        config
    }

    /// Builds a config for an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let mut config = Self::default();
        apply_overrides(
            &mut config,
            Overrides {
                api_base_url: normalize_value(base_url),
                timeout: None,
            },
        );
        config
    }

    /// Checks that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the URL cannot be parsed or uses another scheme.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.api_base_url).map_err(|err| {
            AppError::Config(format!("Invalid API base URL {}: {err}", self.api_base_url))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::Config(format!(
                "Unsupported API base URL scheme: {scheme}"
            ))),
        }
    }
}

/// Optional values that replace defaults when present.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub timeout: Option<Duration>,
}

pub fn apply_overrides(config: &mut ApiConfig, overrides: Overrides) {
    if let Some(value) = overrides.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = overrides.timeout {
        config.timeout = value;
    }
}

/// Trims a configured value and treats blank input as absent.
#[must_use]
pub fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Joins a base URL and a path without doubling slashes.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}
