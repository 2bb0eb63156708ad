use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::portal::auth::DEFAULT_LOGIN_FORM_MARKER;
use crate::portal::session::SessionOptions;
use crate::portal::Credentials;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and writing a starter configuration file.
/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "hinet.json";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Portal endpoints
    pub urls: UrlConfig,

    /// Portal account
    pub account: AccountConfig,

    /// Certificate handling
    #[serde(default)]
    pub tls: TlsConfig,

    /// Login verification
    #[serde(default)]
    pub auth: AuthConfig,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Portal endpoint URLs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UrlConfig {
    // @field: Login endpoint, used for both priming and login
    pub auth: String,

    // @field: Station selection endpoint
    pub select: String,

    // @field: Station metadata endpoint (not used by selection)
    #[serde(default)]
    pub station: String,
}

/// Portal account credentials
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct AccountConfig {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("user", &self.user)
            .field("password", &"********")
            .finish()
    }
}

/// Certificate handling for the portal
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TlsConfig {
    /// Accept the portal certificate without validation for the cookie
    /// priming request. Login and selection always validate.
    #[serde(default = "default_true")]
    pub accept_invalid_certs_on_priming: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs_on_priming: true,
        }
    }
}

/// Login verification settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthConfig {
    /// Fail the run when the login response does not look logged in.
    /// When false, a rejected login is only logged as a warning.
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Text that only appears on the login form
    #[serde(default = "default_login_form_marker")]
    pub login_form_marker: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            strict: true,
            login_form_marker: default_login_form_marker(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_login_form_marker() -> String {
    DEFAULT_LOGIN_FORM_MARKER.to_string()
}

fn default_auth_url() -> String {
    "https://hinetwww11.bosai.go.jp/auth/".to_string()
}

fn default_select_url() -> String {
    "https://hinetwww11.bosai.go.jp/auth/download/cont/select_stations.php".to_string()
}

fn default_station_url() -> String {
    "https://hinetwww11.bosai.go.jp/auth/download/cont/stations.php".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::ConfigurationMissing(path.display().to_string()));
        }

        let content = FileManager::read_text(path)?;
        Self::from_json(&content)
            .map_err(|e| AppError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| anyhow!("Failed to parse config: {}", e))
    }

    /// Write this configuration as pretty JSON
    ///
    /// An existing file is kept unless `overwrite` is set; returns whether
    /// the file was written.
    pub fn save<P: AsRef<Path>>(&self, path: P, overwrite: bool) -> Result<bool> {
        let json = serde_json::to_string_pretty(self)?;
        FileManager::write_new(path, &json, overwrite)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        self.validate_endpoints()?;
        self.validate_account()
    }

    /// Check the portal URLs and timeout; no account needed
    pub fn validate_endpoints(&self) -> Result<(), AppError> {
        for (name, value) in [("urls.auth", &self.urls.auth), ("urls.select", &self.urls.select)] {
            let parsed = url::Url::parse(value)
                .map_err(|e| AppError::InvalidConfig(format!("{} '{}' is not a valid URL: {}", name, value, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::InvalidConfig(format!("{} must be an http(s) URL", name)));
            }
        }

        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// Check the login account; only required once the portal is contacted
    pub fn validate_account(&self) -> Result<(), AppError> {
        if self.account.user.trim().is_empty() {
            return Err(AppError::InvalidConfig("account.user is required".to_string()));
        }

        if self.account.password.is_empty() {
            return Err(AppError::InvalidConfig("account.password is required".to_string()));
        }

        Ok(())
    }

    /// Credentials for the login step
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.account.user.clone(), self.account.password.clone())
    }

    /// Options for building the portal session
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            accept_invalid_certs_on_priming: self.tls.accept_invalid_certs_on_priming,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Per-user fallback location of the configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hinet-selector").join(DEFAULT_CONFIG_FILE))
    }
}

/// Default implementation for Config, used as the starter template
impl Default for Config {
    fn default() -> Self {
        Config {
            urls: UrlConfig {
                auth: default_auth_url(),
                select: default_select_url(),
                station: default_station_url(),
            },
            account: AccountConfig {
                user: String::new(),
                password: String::new(),
            },
            tls: TlsConfig::default(),
            auth: AuthConfig::default(),
            timeout_secs: default_timeout_secs(),
            log_level: LogLevel::default(),
        }
    }
}
