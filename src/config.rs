//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend address when `AGENT_CONSOLE_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default freshness window for cached agents (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API configuration
    pub api: ApiConfig,
    /// Durable client storage configuration
    pub storage: StorageConfig,
    /// Agent cache configuration
    pub cache: CacheConfig,
}

/// Backend API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every request path is appended to (no trailing slash)
    pub base_url: String,
}

/// Durable client storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding `storage.json`
    pub data_dir: PathBuf,
}

/// Agent cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a cached agent counts as fresh; `None` disables the cache
    pub agent_ttl: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let ttl_secs = env::var("AGENT_CONSOLE_CACHE_TTL_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);

        Self {
            api: ApiConfig {
                base_url: normalize_base_url(
                    &env::var("AGENT_CONSOLE_API_URL")
                        .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                ),
            },
            storage: StorageConfig {
                data_dir: env::var_os("AGENT_CONSOLE_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_data_dir),
            },
            cache: CacheConfig {
                agent_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            },
        }
    }

    /// Configuration pointing at an explicit backend and data directory
    ///
    /// Used by tests and embedders that do not want environment lookups.
    pub fn new(base_url: &str, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            api: ApiConfig {
                base_url: normalize_base_url(base_url),
            },
            storage: StorageConfig {
                data_dir: data_dir.into(),
            },
            cache: CacheConfig {
                agent_ttl: Some(Duration::from_secs(DEFAULT_CACHE_TTL_SECS)),
            },
        }
    }

    /// Path of the storage file inside the data directory
    pub fn storage_path(&self) -> PathBuf {
        self.storage.data_dir.join("storage.json")
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// Default to ~/.agent-console or the current directory
fn default_data_dir() -> PathBuf {
    if let Some(home) = env::var_os("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".agent-console");
        path
    } else {
        PathBuf::from(".agent-console")
    }
}
