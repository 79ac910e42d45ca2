//! Configuration management for atlwiki.
//!
//! Parses `atlwiki.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [atlassian]
//! company = "acme"
//! username = "jane@acme.com"
//! token = "${ATLASSIAN_API_TOKEN}"
//!
//! [http]
//! timeout_secs = 30
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `atlassian.company`, `atlassian.username` and `atlassian.token` support
//! `${VAR}` (error if unset) and `${VAR:-default}`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "atlwiki.toml";

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Atlassian site subdomain.
    pub company: Option<String>,
    /// Override account username.
    pub username: Option<String>,
    /// Override API token.
    pub token: Option<String>,
    /// Override HTTP timeout.
    pub timeout_secs: Option<u64>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP client configuration.
    pub http: HttpConfig,
    /// Atlassian site and credentials.
    pub atlassian: Option<AtlassianConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Atlassian site and credentials.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct AtlassianConfig {
    /// Site subdomain (`{company}.atlassian.net`).
    pub company: String,
    /// Account username (usually an email address).
    pub username: String,
    /// API token.
    pub token: String,
}

impl fmt::Debug for AtlassianConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtlassianConfig")
            .field("company", &self.company)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl AtlassianConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or `company`
    /// is not a bare subdomain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.company, "atlassian.company")?;
        require_subdomain(&self.company, "atlassian.company")?;
        require_non_empty(&self.username, "atlassian.username")?;
        require_non_empty(&self.token, "atlassian.token")?;
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`atlassian.token`").
        field: String,
        /// Error message (e.g., "${`ATLASSIAN_API_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a bare subdomain: no dots, slashes, or whitespace.
fn require_subdomain(value: &str, field: &str) -> Result<(), ConfigError> {
    if value
        .chars()
        .any(|c| c == '.' || c == '/' || c == ':' || c.is_whitespace())
    {
        return Err(ConfigError::Validation(format!(
            "{field} must be the site subdomain only (e.g. \"acme\" for acme.atlassian.net)"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `atlwiki.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a referenced environment variable is unset.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if settings.company.is_some() || settings.username.is_some() || settings.token.is_some() {
            let atlassian = self.atlassian.get_or_insert_with(AtlassianConfig::default);
            if let Some(company) = &settings.company {
                atlassian.company.clone_from(company);
            }
            if let Some(username) = &settings.username {
                atlassian.username.clone_from(username);
            }
            if let Some(token) = &settings.token {
                atlassian.token.clone_from(token);
            }
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
    }

    /// Get validated Atlassian configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_atlassian(&self) -> Result<&AtlassianConfig, ConfigError> {
        let atlassian = self.atlassian.as_ref().ok_or_else(|| {
            ConfigError::Validation("[atlassian] section required in config".into())
        })?;
        atlassian.validate()?;
        Ok(atlassian)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The `[atlassian]` section is checked lazily by [`Config::require_atlassian`],
    /// since CLI settings may still complete it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut atlassian) = self.atlassian {
            atlassian.company = expand::expand_env(&atlassian.company, "atlassian.company")?;
            atlassian.username = expand::expand_env(&atlassian.username, "atlassian.username")?;
            atlassian.token = expand::expand_env(&atlassian.token, "atlassian.token")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_atlassian_config() -> AtlassianConfig {
        AtlassianConfig {
            company: "acme".to_owned(),
            username: "jane@acme.com".to_owned(),
            token: "token".to_owned(),
        }
    }

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(result: Result<(), ConfigError>, expected_substrings: &[&str]) {
        let err = result.expect_err("Expected validation to fail");
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert!(config.atlassian.is_none());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.atlassian.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[atlassian]
company = "acme"
username = "jane@acme.com"
token = "token123"

[http]
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let atlassian = config.atlassian.unwrap();
        assert_eq!(atlassian.company, "acme");
        assert_eq!(atlassian.username, "jane@acme.com");
        assert_eq!(atlassian.token, "token123");
        assert_eq!(config.http.timeout_secs, 5);
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", valid_atlassian_config());
        assert!(debug.contains("acme"));
        assert!(!debug.contains("\"token\""));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[atlassian]
company = "acme"
username = "jane@acme.com"
token = "token123"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.require_atlassian().unwrap().company, "acme");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[atlassian\ncompany = ");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("ATLWIKI_TEST_LOAD_TOKEN", "from-env");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[atlassian]
company = "${ATLWIKI_TEST_LOAD_COMPANY_UNSET:-acme}"
username = "jane@acme.com"
token = "${ATLWIKI_TEST_LOAD_TOKEN}"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        let atlassian = config.require_atlassian().unwrap();

        assert_eq!(atlassian.company, "acme");
        assert_eq!(atlassian.token, "from-env");
        unsafe {
            std::env::remove_var("ATLWIKI_TEST_LOAD_TOKEN");
        }
    }

    #[test]
    fn test_load_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[http]\ntimeout_secs = 0\n");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_apply_cli_settings_creates_section() {
        let mut config = Config::default();
        let settings = CliSettings {
            company: Some("acme".to_owned()),
            username: Some("jane@acme.com".to_owned()),
            token: Some("token".to_owned()),
            timeout_secs: Some(10),
        };

        config.apply_cli_settings(&settings);

        let atlassian = config.require_atlassian().unwrap();
        assert_eq!(atlassian.company, "acme");
        assert_eq!(atlassian.username, "jane@acme.com");
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn test_apply_cli_settings_overrides_single_field() {
        let mut config = Config {
            atlassian: Some(valid_atlassian_config()),
            ..Default::default()
        };
        let settings = CliSettings {
            token: Some("other".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&settings);

        let atlassian = config.atlassian.unwrap();
        assert_eq!(atlassian.token, "other");
        assert_eq!(atlassian.company, "acme"); // Unchanged
        assert_eq!(config.http.timeout_secs, 30); // Unchanged
    }

    #[test]
    fn test_apply_empty_cli_settings_keeps_section_absent() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert!(config.atlassian.is_none());
    }

    #[test]
    fn test_require_atlassian_missing_section() {
        let config = Config::default();
        let err = config.require_atlassian().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[atlassian]"));
    }

    #[test]
    fn test_atlassian_validate_valid() {
        assert!(valid_atlassian_config().validate().is_ok());
    }

    #[test]
    fn test_atlassian_validate_empty_fields() {
        for (config, field) in [
            (
                AtlassianConfig {
                    company: String::new(),
                    ..valid_atlassian_config()
                },
                "atlassian.company",
            ),
            (
                AtlassianConfig {
                    username: String::new(),
                    ..valid_atlassian_config()
                },
                "atlassian.username",
            ),
            (
                AtlassianConfig {
                    token: String::new(),
                    ..valid_atlassian_config()
                },
                "atlassian.token",
            ),
        ] {
            assert_validation_error(config.validate(), &[field, "empty"]);
        }
    }

    #[test]
    fn test_atlassian_validate_rejects_full_host() {
        for company in ["acme.atlassian.net", "https://acme", "ac me"] {
            let config = AtlassianConfig {
                company: company.to_owned(),
                ..valid_atlassian_config()
            };
            assert_validation_error(config.validate(), &["atlassian.company", "subdomain"]);
        }
    }
}
