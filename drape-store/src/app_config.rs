use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storefront: StorefrontConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres URL of the hosted store. Without it the in-memory store is used.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorefrontConfig {
    #[serde(default = "default_featured_limit")]
    pub featured_limit: u32,
    #[serde(default = "default_order_notice")]
    pub order_notice_seconds: u64,
    #[serde(default = "default_booking_notice")]
    pub booking_notice_seconds: u64,
    /// JSON product list used to seed the in-memory store
    pub seed_catalog: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            featured_limit: default_featured_limit(),
            order_notice_seconds: default_order_notice(),
            booking_notice_seconds: default_booking_notice(),
            seed_catalog: None,
        }
    }
}

impl StorefrontConfig {
    pub fn order_notice(&self) -> Duration {
        Duration::from_secs(self.order_notice_seconds)
    }

    pub fn booking_notice(&self) -> Duration {
        Duration::from_secs(self.booking_notice_seconds)
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_acquire_timeout() -> u64 { 3 }
fn default_featured_limit() -> u32 { drape_catalog::FEATURED_LIMIT }
fn default_order_notice() -> u64 { 3 }
fn default_booking_notice() -> u64 { 2 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Shipped defaults; optional so the binary also runs outside the repo root
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, never checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `DRAPE_DATABASE__URL=postgres://...` sets `database.url`
            .add_source(config::Environment::with_prefix("DRAPE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a TOML document on its own, without files or environment.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
