use std::env;

use auth::Argon2Params;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. Without one the service keeps users in memory.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl From<PasswordConfig> for Argon2Params {
    fn from(config: PasswordConfig) -> Self {
        Argon2Params {
            memory_kib: config.memory_kib,
            iterations: config.iterations,
            parallelism: config.parallelism,
        }
    }
}

impl Config {
    pub const DEFAULT_HTTP_PORT: i64 = 8080;
    pub const DEFAULT_TTL_SECONDS: i64 = 900;
    pub const MAX_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let argon2 = Argon2Params::default();

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", Self::DEFAULT_HTTP_PORT)?
            .set_default("jwt.ttl_seconds", Self::DEFAULT_TTL_SECONDS)?
            .set_default("database.max_connections", 5_i64)?
            .set_default("password.memory_kib", i64::from(argon2.memory_kib))?
            .set_default("password.iterations", i64::from(argon2.iterations))?
            .set_default("password.parallelism", i64::from(argon2.parallelism))?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    ///
    /// # Errors
    /// * `Message` - Empty signing secret, or token TTL outside `1..=MAX_TTL_SECONDS`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (e.g. JWT__SECRET)".to_string(),
            ));
        }

        if self.jwt.ttl_seconds <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.ttl_seconds must be positive, got {}",
                self.jwt.ttl_seconds
            )));
        }

        if self.jwt.ttl_seconds > Self::MAX_TTL_SECONDS {
            return Err(ConfigError::Message(format!(
                "jwt.ttl_seconds must be at most {}, got {}",
                Self::MAX_TTL_SECONDS,
                self.jwt.ttl_seconds
            )));
        }

        Ok(())
    }
}
