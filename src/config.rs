//! Configuration management for the civic portal core
//!
//! Values come from built-in defaults, an optional `civic-portal.toml`, and
//! `CIVIC_PORTAL_*` environment variables, in increasing precedence. Everything
//! is read once at startup; the auth mode in particular never changes later.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::auth::AuthMode;

const CONFIG_FILE: &str = "civic-portal";
const ENV_PREFIX: &str = "CIVIC_PORTAL";

#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    /// Backend base URL. Absent or blank selects local mode.
    /// Environment: CIVIC_PORTAL_API_URL
    pub api_url: Option<String>,

    /// Base URL of the image classification service.
    pub classifier_url: String,

    /// Directory the session is persisted into.
    pub storage_dir: String,

    /// Timeout for every outbound HTTP request.
    pub request_timeout_secs: u64,

    /// Reject overlapping logins with `LoginInProgress`.
    pub serialize_logins: bool,

    pub max_credential_length: usize,

    /// Predictions below this confidence are sent back for review.
    pub low_confidence_threshold: f64,
}

impl PortalConfig {
    /// Load from `civic-portal.toml` (if present) with environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name(CONFIG_FILE).required(false))
    }

    /// Load from an explicit file, still honouring environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("classifier_url", "http://127.0.0.1:8000")?
            .set_default("storage_dir", "./session")?
            .set_default("request_timeout_secs", 10_i64)?
            .set_default("serialize_logins", false)?
            .set_default("max_credential_length", 256_i64)?
            .set_default("low_confidence_threshold", 0.5)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: PortalConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = self.api_url.as_deref() {
            if !url.trim().is_empty() && !is_http_url(url) {
                return Err(ConfigError::Message(format!(
                    "api_url must be an http(s) URL, got {url:?}"
                )));
            }
        }

        if !is_http_url(&self.classifier_url) {
            return Err(ConfigError::Message(format!(
                "classifier_url must be an http(s) URL, got {:?}",
                self.classifier_url
            )));
        }

        if self.storage_dir.trim().is_empty() {
            return Err(ConfigError::Message("storage_dir cannot be empty".into()));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.max_credential_length == 0 {
            return Err(ConfigError::Message(
                "max_credential_length must be greater than 0".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.low_confidence_threshold) {
            return Err(ConfigError::Message(
                "low_confidence_threshold must be between 0 and 1".into(),
            ));
        }

        Ok(())
    }

    /// Mode selected by the presence of `api_url`.
    pub fn auth_mode(&self) -> AuthMode {
        AuthMode::from_api_url(self.api_url.as_deref())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_dir)
    }
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_select_local_mode() {
        let file = write_config("");
        let config = PortalConfig::load_from(file.path()).unwrap();

        assert_eq!(config.auth_mode(), AuthMode::Local);
        assert_eq!(config.classifier_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(!config.serialize_logins);
        assert_eq!(config.low_confidence_threshold, 0.5);
    }

    #[test]
    fn test_api_url_selects_remote_mode() {
        let file = write_config("api_url = \"https://api.example.org/\"\nserialize_logins = true\n");
        let config = PortalConfig::load_from(file.path()).unwrap();

        assert_eq!(
            config.auth_mode(),
            AuthMode::Remote("https://api.example.org".into())
        );
        assert!(config.serialize_logins);
    }

    #[test]
    fn test_blank_api_url_is_local() {
        let file = write_config("api_url = \"\"\n");
        let config = PortalConfig::load_from(file.path()).unwrap();
        assert_eq!(config.auth_mode(), AuthMode::Local);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for contents in [
            "request_timeout_secs = 0\n",
            "low_confidence_threshold = 1.5\n",
            "api_url = \"ftp://nope\"\n",
            "classifier_url = \"localhost:8000\"\n",
            "storage_dir = \"\"\n",
        ] {
            let file = write_config(contents);
            assert!(
                PortalConfig::load_from(file.path()).is_err(),
                "accepted {contents:?}"
            );
        }
    }
}
