use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

/// Credentials and pool tuning for the relational store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub pool: PoolConfig,
    /// Create tables from the entity definitions at startup
    pub create_schema: bool,
}

impl DatabaseConfig {
    /// Postgres connection URL with user and password percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Url` if host or database name do not form a
    /// valid URL.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        let mut url = Url::parse(&format!(
            "postgres://{}:{}/{}",
            self.host, self.port, self.name
        ))?;
        url.set_username(&self.user)
            .map_err(|()| ConfigError::Invalid {
                key: "DATABASE_USER",
                value: self.user.clone(),
            })?;
        url.set_password(Some(&self.password))
            .map_err(|()| ConfigError::Invalid {
                key: "DATABASE_PASSWORD",
                value: "<redacted>".to_string(),
            })?;
        Ok(url.into())
    }
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Connections kept open while idle
    pub size: u32,
    /// Extra connections allowed on top of `size` under load
    pub max_overflow: u32,
    /// Connections older than this are closed and replaced
    pub recycle: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: 5,
            max_overflow: 5,
            recycle: Duration::from_secs(14_400),
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn max_connections(&self) -> u32 {
        self.size.saturating_add(self.max_overflow)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database: DatabaseConfig,

    // Shared secret expected in the X-API-KEY header
    pub api_key: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not
    /// set and `ConfigError::Invalid` if a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Required values that are absent or empty are reported as missing.
    /// Optional values fall back to their default only when unset or empty;
    /// a value that is set but does not parse is an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for the first absent required variable
    /// and `ConfigError::Invalid` for the first malformed one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));
        let optional = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let defaults = PoolConfig::default();

        Ok(Self {
            // Database
            database: DatabaseConfig {
                host: required("DATABASE_HOST")?,
                port: parsed(var("DATABASE_PORT"), "DATABASE_PORT", 5432)?,
                name: required("DATABASE_NAME")?,
                user: required("DATABASE_USER")?,
                password: required("DATABASE_PASSWORD")?,
                pool: PoolConfig {
                    size: parsed(var("DATABASE_POOL_SIZE"), "DATABASE_POOL_SIZE", defaults.size)?,
                    max_overflow: parsed(
                        var("DATABASE_MAX_OVERFLOW"),
                        "DATABASE_MAX_OVERFLOW",
                        defaults.max_overflow,
                    )?,
                    recycle: Duration::from_secs(parsed(
                        var("DATABASE_POOL_RECYCLE_SECONDS"),
                        "DATABASE_POOL_RECYCLE_SECONDS",
                        defaults.recycle.as_secs(),
                    )?),
                    acquire_timeout: Duration::from_secs(parsed(
                        var("DATABASE_ACQUIRE_TIMEOUT_SECONDS"),
                        "DATABASE_ACQUIRE_TIMEOUT_SECONDS",
                        defaults.acquire_timeout.as_secs(),
                    )?),
                },
                create_schema: parsed(
                    var("DATABASE_CREATE_SCHEMA"),
                    "DATABASE_CREATE_SCHEMA",
                    false,
                )?,
            },

            api_key: required("API_KEY")?,

            // API settings
            api_host: optional("API_HOST", "0.0.0.0"),
            api_port: parsed(var("API_PORT"), "API_PORT", 3000)?,
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Invalid database URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Parse `raw` if set, otherwise use `default`.
fn parsed<T: FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
