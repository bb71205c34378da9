use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, ENV_PREFIX, PERMISSION_TOKENS};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub library: Vec<LibraryConfig>,
    #[serde(default)]
    pub scope: Vec<ScopeConfig>,
    #[serde(default)]
    pub user: Vec<UserConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Take the client address from `X-Forwarded-For` / `X-Real-IP`.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Brute-force mitigation toggles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// Failed attempts refilled per five minutes; `<= 0` disables banning.
    #[serde(default, alias = "password_retry_per_five_minute")]
    pub retry_limit: i64,
    #[serde(default, alias = "ban_user_wrong_pwd")]
    pub ban_username_on_failure: bool,
    #[serde(default, alias = "ban_ip_wrong_pwd")]
    pub ban_address_on_failure: bool,
}

/// A directory tree served under a URL prefix.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    pub name: String,
    pub mount_point: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    pub name: String,
    pub library: String,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub permission: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    pub username: String,
    #[serde(default)]
    pub credential: String,
    #[serde(default)]
    pub scope: Vec<String>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from the TOML file and `TANTO__*` environment variables.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load(path: &str) -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name(path).required(false))
            // Env overrides
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Parses settings from an in-memory TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not match `Settings`.
    pub fn from_toml_str(document: &str) -> CoreResult<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "info")?
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Checks cross references between libraries, scopes and users.
    ///
    /// ## Errors
    /// Returns `ValidationError` naming the first offending entry.
    pub fn validate(&self) -> CoreResult<()> {
        let mut library_names = HashSet::new();
        for library in &self.library {
            validate_library(library)?;
            if !library_names.insert(library.name.as_str()) {
                return Err(CoreError::ValidationError(format!(
                    "library[{}] is defined more than once",
                    library.name
                )));
            }
        }

        for scope in &self.scope {
            validate_scope(scope, &library_names)?;
        }

        let scope_names: HashSet<&str> = self.scope.iter().map(|s| s.name.as_str()).collect();
        for user in &self.user {
            validate_user(user, &scope_names)?;
        }

        Ok(())
    }
}

fn validate_library(library: &LibraryConfig) -> CoreResult<()> {
    if library.name.is_empty() {
        return Err(CoreError::ValidationError("empty library name".to_string()));
    }
    if library.mount_point.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "the mount point of library[{}] is empty",
            library.name
        )));
    }
    if !Path::new(&library.mount_point).is_absolute() {
        return Err(CoreError::ValidationError(format!(
            "mount point only supports absolute paths for library[{}]",
            library.name
        )));
    }
    Ok(())
}

fn validate_scope(scope: &ScopeConfig, libraries: &HashSet<&str>) -> CoreResult<()> {
    if scope.name.is_empty() {
        return Err(CoreError::ValidationError("empty scope name".to_string()));
    }
    if !libraries.contains(scope.library.as_str()) {
        return Err(CoreError::ValidationError(format!(
            "library[{}] of scope[{}] not found",
            scope.library, scope.name
        )));
    }
    if let Some(token) = scope
        .permission
        .iter()
        .find(|token| !PERMISSION_TOKENS.contains(&token.as_str()))
    {
        return Err(CoreError::ValidationError(format!(
            "scope[{}] permission[{token}] is invalid",
            scope.name
        )));
    }
    Ok(())
}

fn validate_user(user: &UserConfig, scopes: &HashSet<&str>) -> CoreResult<()> {
    if user.username.is_empty() {
        return Err(CoreError::ValidationError("empty user name".to_string()));
    }
    if let Some(scope) = user.scope.iter().find(|s| !scopes.contains(s.as_str())) {
        return Err(CoreError::ValidationError(format!(
            "the scope[{scope}] of user[{}] not found",
            user.username
        )));
    }
    Ok(())
}

/// ## Summary
/// Loads and validates configuration from `.env`, the configuration file named by
/// `TANTO_CONFIG` (default `config.toml`) and environment variables.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    tracing::debug!(path = %path, "Loading configuration");

    let settings = Settings::load(&path)?;
    settings.validate()?;
    Ok(settings)
}
