use std::env;

use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenError;
use auth::TokenLifetimes;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// PostgreSQL configuration. Without a URL users are kept in memory.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

/// Session token configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub keep_alive_days: i64,
}

impl JwtConfig {
    /// # Errors
    /// * `InvalidLifetime` - A lifetime is not positive or is out of range
    pub fn lifetimes(&self) -> Result<TokenLifetimes, TokenError> {
        let standard = Duration::try_hours(self.expiration_hours)
            .ok_or(TokenError::InvalidLifetime(i64::MAX))?;
        let extended = Duration::try_days(self.keep_alive_days)
            .ok_or(TokenError::InvalidLifetime(i64::MAX))?;

        TokenLifetimes::new(standard, extended)
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl PasswordConfig {
    pub fn hasher(&self) -> Result<PasswordHasher, PasswordError> {
        PasswordHasher::with_params(self.memory_kib, self.iterations, self.parallelism)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2_defaults::MEMORY_KIB,
            iterations: argon2_defaults::ITERATIONS,
            parallelism: argon2_defaults::PARALLELISM,
        }
    }
}

// Matches the argon2 crate's recommended Argon2id parameters.
mod argon2_defaults {
    pub const MEMORY_KIB: u32 = 19 * 1024;
    pub const ITERATIONS: u32 = 2;
    pub const PARALLELISM: u32 = 1;
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TINYCLOUD_JWT__SECRET, TINYCLOUD_SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TINYCLOUD_JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::with_prefix("TINYCLOUD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
