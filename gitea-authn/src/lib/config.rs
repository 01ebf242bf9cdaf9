use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for gitea-authn.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub gitea: GiteaConfig,
    #[serde(default)]
    pub token_store: TokenStoreConfig,
    #[serde(default)]
    pub hasher: HasherConfig,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Gitea API and revalidation configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct GiteaConfig {
    /// Base URI of the Gitea API, without the `/v1` suffix.
    #[serde(default = "default_api_uri")]
    pub api_uri: String,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Time-to-live of a cached successful authentication.
    #[serde(default = "default_revalidate_after_secs")]
    pub revalidate_after_secs: u64,
}

/// Credential cache backend configuration.
///
/// `url` is either `memory` or a `postgres://` connection string.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenStoreConfig {
    #[serde(default = "default_token_store_url")]
    pub url: String,
    #[serde(default = "default_token_store_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Argon2id cost parameters for stored proofs.
#[derive(Debug, Deserialize, Clone)]
pub struct HasherConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTHN__GITEA__API_URI, AUTHN__SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: AUTHN__TOKEN_STORE__URL=postgres://... overrides token_store.url
            .add_source(Environment::with_prefix("AUTHN").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

impl GiteaConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn revalidate_after(&self) -> Duration {
        Duration::from_secs(self.revalidate_after_secs)
    }
}

impl TokenStoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GiteaConfig {
    fn default() -> Self {
        Self {
            api_uri: default_api_uri(),
            http_timeout_secs: default_http_timeout_secs(),
            revalidate_after_secs: default_revalidate_after_secs(),
        }
    }
}

impl Default for TokenStoreConfig {
    fn default() -> Self {
        Self {
            url: default_token_store_url(),
            timeout_ms: default_token_store_timeout_ms(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_api_uri() -> String {
    "https://gitea.com/api".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_revalidate_after_secs() -> u64 {
    3600
}

fn default_token_store_url() -> String {
    "memory".to_string()
}

fn default_token_store_timeout_ms() -> u64 {
    2000
}

fn default_max_connections() -> u32 {
    5
}

// Argon2id defaults (19 MiB, 2 passes, 1 lane)
fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
