//! Client configuration.
//!
//! A [`ClientConfig`] can be built in code, loaded from a TOML file, or read
//! from `AVATAX_*` environment variables.
//!
//! # Example TOML
//! ```toml
//! environment = "sandbox"
//! app_name = "billing-service"
//! app_version = "2.4.1"
//! machine_name = "billing-01"
//! timeout_secs = 60
//!
//! [credentials]
//! account_id = "1100012345"
//! license_key = "..."
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const SANDBOX_URL: &str = "https://sandbox-rest.avatax.com";
pub const PRODUCTION_URL: &str = "https://rest.avatax.com";

const DEFAULT_TIMEOUT_SECS: u64 = 1200;

/// Which service instance to talk to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
    /// Any other base URL (local mocks, proxies).
    Custom(String),
}

impl Environment {
    pub fn base_url(&self) -> &str {
        match self {
            Environment::Sandbox => SANDBOX_URL,
            Environment::Production => PRODUCTION_URL,
            Environment::Custom(url) => url.trim_end_matches('/'),
        }
    }

    /// `sandbox`, `production`, or an `http(s)://` URL.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("sandbox") {
            Ok(Environment::Sandbox)
        } else if value.eq_ignore_ascii_case("production") {
            Ok(Environment::Production)
        } else if value.starts_with("http://") || value.starts_with("https://") {
            Ok(Environment::Custom(value.to_string()))
        } else {
            Err(ConfigError::invalid(format!(
                "environment must be sandbox, production, or a URL (got {value:?})"
            )))
        }
    }
}

/// How requests authenticate.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    UsernamePassword { username: String, password: String },
    /// Account id and license key, sent as HTTP Basic.
    AccountLicense { account_id: String, license_key: String },
    BearerToken(String),
    #[default]
    None,
}

impl Credentials {
    /// Pick credentials from whichever values are present.
    ///
    /// Precedence: bearer token, then username/password, then
    /// account id/license key. A half-specified pair is an error.
    pub fn resolve(
        bearer_token: Option<String>,
        username: Option<String>,
        password: Option<String>,
        account_id: Option<String>,
        license_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(token) = bearer_token {
            return Ok(Credentials::BearerToken(token));
        }

        match (username, password) {
            (Some(username), Some(password)) => {
                return Ok(Credentials::UsernamePassword { username, password });
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(ConfigError::invalid("username and password must be set together"));
            }
            (None, None) => {}
        }

        match (account_id, license_key) {
            (Some(account_id), Some(license_key)) => Ok(Credentials::AccountLicense {
                account_id,
                license_key,
            }),
            (Some(_), None) | (None, Some(_)) => Err(ConfigError::invalid(
                "account id and license key must be set together",
            )),
            (None, None) => Ok(Credentials::None),
        }
    }
}

// Secrets stay out of logs.
impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Credentials::UsernamePassword { username, .. } => f
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::AccountLicense { account_id, .. } => f
                .debug_struct("AccountLicense")
                .field("account_id", account_id)
                .field("license_key", &"<redacted>")
                .finish(),
            Credentials::BearerToken(_) => f.debug_tuple("BearerToken").field(&"<redacted>").finish(),
            Credentials::None => f.write_str("None"),
        }
    }
}

/// Everything the HTTP dispatcher needs to reach and identify itself to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub environment: Environment,
    pub credentials: Credentials,
    pub app_name: String,
    pub app_version: String,
    pub machine_name: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Environment::default(), Credentials::default())
    }
}

impl ClientConfig {
    pub fn new(environment: Environment, credentials: Credentials) -> Self {
        Self {
            environment,
            credentials,
            app_name: "avatax-client".to_string(),
            app_version: crate::SDK_VERSION.to_string(),
            machine_name: default_machine_name(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_app(mut self, app_name: impl Into<String>, app_version: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self.app_version = app_version.into();
        self
    }

    pub fn with_machine_name(mut self, machine_name: impl Into<String>) -> Self {
        self.machine_name = machine_name.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        self.environment.base_url()
    }

    /// Value of the `X-Avalara-Client` identification header.
    pub fn client_header(&self) -> String {
        format!(
            "{}; {}; RustSdk; {}; {}",
            self.app_name,
            self.app_version,
            crate::SDK_VERSION,
            self.machine_name
        )
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content)?;
        file.into_config()
    }

    /// Read `AVATAX_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with a custom variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match var("AVATAX_ENVIRONMENT") {
            Some(value) => Environment::parse(&value)?,
            None => Environment::default(),
        };

        let credentials = Credentials::resolve(
            var("AVATAX_BEARER_TOKEN"),
            var("AVATAX_USERNAME"),
            var("AVATAX_PASSWORD"),
            var("AVATAX_ACCOUNT_ID"),
            var("AVATAX_LICENSE_KEY"),
        )?;

        let mut config = ClientConfig::new(environment, credentials);
        if let Some(app_name) = var("AVATAX_APP_NAME") {
            config.app_name = app_name;
        }
        if let Some(app_version) = var("AVATAX_APP_VERSION") {
            config.app_version = app_version;
        }
        if let Some(machine_name) = var("AVATAX_MACHINE_NAME") {
            config.machine_name = machine_name;
        }
        if let Some(timeout) = var("AVATAX_TIMEOUT_SECS") {
            let secs: u64 = timeout.trim().parse().map_err(|e| {
                ConfigError::invalid(format!("AVATAX_TIMEOUT_SECS: {e}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn default_machine_name() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// On-disk shape of the TOML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    environment: Option<String>,
    app_name: Option<String>,
    app_version: Option<String>,
    machine_name: Option<String>,
    timeout_secs: Option<u64>,
    #[serde(default)]
    credentials: FileCredentials,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileCredentials {
    bearer_token: Option<String>,
    username: Option<String>,
    password: Option<String>,
    account_id: Option<String>,
    license_key: Option<String>,
}

impl FileConfig {
    fn into_config(self) -> Result<ClientConfig, ConfigError> {
        let environment = match self.environment {
            Some(value) => Environment::parse(&value)?,
            None => Environment::default(),
        };
        let c = self.credentials;
        let credentials =
            Credentials::resolve(c.bearer_token, c.username, c.password, c.account_id, c.license_key)?;

        let mut config = ClientConfig::new(environment, credentials);
        if let Some(app_name) = self.app_name {
            config.app_name = app_name;
        }
        if let Some(app_version) = self.app_version {
            config.app_version = app_version;
        }
        if let Some(machine_name) = self.machine_name {
            config.machine_name = machine_name;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
