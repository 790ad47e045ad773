//! Cart module configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_BACKEND` - Active persistence backend: `local` or `remote`
//!   (default: local)
//! - `CART_STORAGE_DIR` - Directory holding the local slot file
//!   (default: .emberwick)
//! - `CART_API_BASE_URL` - Base URL of the remote cart service (default:
//!   the deployment constant)
//! - `CART_API_TOKEN` - Bearer credential for the cart API; omit when the
//!   deployment transmits the credential implicitly
//! - `CART_LOGIN_URL` - Login surface to redirect to when the credential is
//!   rejected (default: /login)

use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Base URL of the cart service for this deployment.
const DEFAULT_API_BASE_URL: &str = "https://shop.emberwick.com";

/// Directory holding the local slot file when none is configured.
const DEFAULT_STORAGE_DIR: &str = ".emberwick";

/// Login surface used when the cart API rejects the credential.
const DEFAULT_LOGIN_URL: &str = "/login";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which persistence backend is active for this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// JSON slot file on the local machine.
    #[default]
    Local,
    /// Remote cart API.
    Remote,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            other => Err(format!("expected 'local' or 'remote', got '{other}'")),
        }
    }
}

/// Cart module configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Active persistence backend.
    pub backend: BackendKind,
    /// Local slot settings.
    pub local: LocalStoreConfig,
    /// Remote cart API settings.
    pub remote: RemoteStoreConfig,
}

/// Local slot settings.
#[derive(Debug, Clone)]
pub struct LocalStoreConfig {
    /// Directory holding the slot file.
    pub dir: PathBuf,
}

/// Remote cart API settings.
///
/// Implements `Debug` manually to redact the credential.
#[derive(Clone)]
pub struct RemoteStoreConfig {
    /// Base URL of the cart service.
    pub base_url: Url,
    /// Bearer credential; `None` when the deployment transmits the
    /// credential implicitly.
    pub api_token: Option<SecretString>,
    /// Login surface to redirect to on credential rejection.
    pub login_url: String,
}

impl std::fmt::Debug for RemoteStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("login_url", &self.login_url)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Every
    /// variable has a default, so a bare environment yields a working local
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = match get_optional_env("CART_BACKEND") {
            Some(value) => value
                .parse::<BackendKind>()
                .map_err(|e| ConfigError::InvalidEnvVar("CART_BACKEND".to_string(), e))?,
            None => BackendKind::default(),
        };

        let local = LocalStoreConfig {
            dir: PathBuf::from(get_env_or_default("CART_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
        };

        let base_url = get_env_or_default("CART_API_BASE_URL", DEFAULT_API_BASE_URL);
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_API_BASE_URL".to_string(), e.to_string())
        })?;

        let remote = RemoteStoreConfig {
            base_url,
            api_token: get_optional_env("CART_API_TOKEN").map(SecretString::from),
            login_url: get_env_or_default("CART_LOGIN_URL", DEFAULT_LOGIN_URL),
        };

        Ok(Self {
            backend,
            local,
            remote,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
