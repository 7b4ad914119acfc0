use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tokens: TokenConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            environment: default_environment(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    #[serde(default = "default_token_ttl_hours")]
    pub authentication_ttl_hours: i64,
    #[serde(default = "default_token_ttl_hours")]
    pub activation_ttl_hours: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            authentication_ttl_hours: default_token_ttl_hours(),
            activation_ttl_hours: default_token_ttl_hours(),
        }
    }
}

/// Per-client token bucket parameters, shared by every client.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,
    #[serde(default = "default_burst")]
    pub burst: u32,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    #[serde(default = "default_stale_after_secs")]
    pub stale_after_secs: u64,
}

impl RateLimitConfig {
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
            sweep_interval_secs: default_sweep_interval_secs(),
            stale_after_secs: default_stale_after_secs(),
        }
    }
}

/// Ten years.
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

fn default_max_connections() -> u32 {
    5
}

fn default_query_timeout_secs() -> u64 {
    3
}

fn default_http_port() -> u16 {
    4000
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_requests_per_second() -> f64 {
    2.0
}

fn default_burst() -> u32 {
    4
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_stale_after_secs() -> u64 {
    180
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, RATE_LIMIT__BURST, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the token lifetimes or the rate limiter cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tokens.validate()?;
        self.rate_limit.validate()
    }
}

impl TokenConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, hours) in [
            ("tokens.authentication_ttl_hours", self.authentication_ttl_hours),
            ("tokens.activation_ttl_hours", self.activation_ttl_hours),
        ] {
            if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
                return Err(ConfigError::Message(format!(
                    "{key} must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {hours}"
                )));
            }
        }
        Ok(())
    }
}

impl RateLimitConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.requests_per_second.is_finite() || self.requests_per_second < 0.0 {
            return Err(ConfigError::Message(format!(
                "rate_limit.requests_per_second must be a finite, non-negative number, got {}",
                self.requests_per_second
            )));
        }
        if self.burst == 0 {
            return Err(ConfigError::Message(
                "rate_limit.burst must be at least 1".to_string(),
            ));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Message(
                "rate_limit.sweep_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.stale_after_secs == 0 {
            return Err(ConfigError::Message(
                "rate_limit.stale_after_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
