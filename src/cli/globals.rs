use crate::{
    api::{
        config::{apply_overrides, normalize_value, Overrides},
        ApiConfig, FileTokenStore,
    },
    components::table::OutputFormat,
    features::auth::state::SessionContext,
    routes::HistoryNavigator,
};
use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    pub api_base_url: String,
    pub token_file: Option<PathBuf>,
    pub timeout_secs: u64,
    pub output: OutputFormat,
}

impl GlobalArgs {
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::default();
        apply_overrides(
            &mut config,
            Overrides {
                api_base_url: normalize_value(&self.api_base_url),
                timeout: Some(Duration::from_secs(self.timeout_secs)),
            },
        );
        config
    }

    /// Token file location, falling back to the platform config dir.
    ///
    /// # Errors
    /// Returns an error when no home directory can be determined.
    pub fn token_path(&self) -> Result<PathBuf> {
        match &self.token_file {
            Some(path) => Ok(path.clone()),
            None => Ok(FileTokenStore::default_path()?),
        }
    }

    /// Builds the session context shared by every page for this invocation.
    ///
    /// # Errors
    /// Returns an error if the API configuration is invalid.
    pub fn session_context(&self) -> Result<(SessionContext, Arc<HistoryNavigator>)> {
        let store = Arc::new(FileTokenStore::new(self.token_path()?));
        let navigator = Arc::new(HistoryNavigator::default());
        let ctx = SessionContext::new(self.api_config(), store, navigator.clone())
            .context("Failed to initialize session")?;
        Ok((ctx, navigator))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn globals() -> GlobalArgs {
        GlobalArgs {
            api_base_url: " https://api.smartclaim.test/ ".to_string(),
            token_file: Some(PathBuf::from("/tmp/smartclaim-test-session.json")),
            timeout_secs: 7,
            output: OutputFormat::Table,
        }
    }

    #[test]
    fn api_config_applies_overrides() {
        let config = globals().api_config();
        assert_eq!(config.api_base_url, "https://api.smartclaim.test/");
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn explicit_token_file_wins() {
        assert_eq!(
            globals().token_path().unwrap(),
            PathBuf::from("/tmp/smartclaim-test-session.json")
        );
    }

    #[test]
    fn invalid_base_url_fails_session_setup() {
        let mut args = globals();
        args.api_base_url = "ftp://files.smartclaim.test".to_string();
        assert!(args.session_context().is_err());
    }
}
