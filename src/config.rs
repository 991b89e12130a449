//! Configuration Module
//!
//! Loads server and pipeline settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default upstream company list
pub const DEFAULT_DATASET_URL: &str = "https://www.asx.com.au/asx/research/ASXListedCompanies.csv";

const DAY_SECS: u64 = 24 * 60 * 60;

/// Key and lifetime of one cache stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Full key for the dataset stage, key prefix for the entry stage
    pub key: String,
    /// Absolute lifetime from write
    pub ttl: Duration,
}

impl CacheSettings {
    pub fn new(key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            ttl,
        }
    }
}

/// A client allowed to call the protected endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyEntry {
    pub key: String,
    pub client_name: String,
}

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub dataset_url: String,
    /// Upper bound on one upstream fetch, connect to last byte
    pub fetch_timeout: Duration,
    pub dataset_cache: CacheSettings,
    pub entry_cache: CacheSettings,
    pub cache_max_entries: usize,
    /// Seconds between expired-entry sweeps
    pub cleanup_interval: u64,
    pub api_keys: Vec<ApiKeyEntry>,
}

impl Config {
    /// Creates a Config from environment variables, falling back to defaults.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` (default: 8080)
    /// - `DATASET_URL` (default: the ASX listed companies CSV)
    /// - `FETCH_TIMEOUT` - seconds (default: 30)
    /// - `DATASET_CACHE_KEY` (default: `AsxCompanies_All`)
    /// - `DATASET_CACHE_TTL` - seconds (default: 86400)
    /// - `ENTRY_CACHE_PREFIX` (default: `AsxCompany_`)
    /// - `ENTRY_CACHE_TTL` - seconds (default: 86400)
    /// - `CACHE_MAX_ENTRIES` (default: 10000)
    /// - `CLEANUP_INTERVAL` - seconds (default: 60)
    /// - `API_KEYS` - `key:client` pairs separated by commas (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            dataset_url: env::var("DATASET_URL").unwrap_or(defaults.dataset_url),
            fetch_timeout: Duration::from_secs(env_or(
                "FETCH_TIMEOUT",
                defaults.fetch_timeout.as_secs(),
            )),
            dataset_cache: CacheSettings::new(
                env::var("DATASET_CACHE_KEY").unwrap_or(defaults.dataset_cache.key),
                Duration::from_secs(env_or("DATASET_CACHE_TTL", DAY_SECS)),
            ),
            entry_cache: CacheSettings::new(
                env::var("ENTRY_CACHE_PREFIX").unwrap_or(defaults.entry_cache.key),
                Duration::from_secs(env_or("ENTRY_CACHE_TTL", DAY_SECS)),
            ),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            api_keys: env::var("API_KEYS")
                .map(|raw| parse_api_keys(&raw))
                .unwrap_or_default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            fetch_timeout: Duration::from_secs(30),
            dataset_cache: CacheSettings::new("AsxCompanies_All", Duration::from_secs(DAY_SECS)),
            entry_cache: CacheSettings::new("AsxCompany_", Duration::from_secs(DAY_SECS)),
            cache_max_entries: 10_000,
            cleanup_interval: 60,
            api_keys: Vec::new(),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses `key:client,key2:client2`. Malformed or blank pairs are skipped.
pub fn parse_api_keys(raw: &str) -> Vec<ApiKeyEntry> {
    raw.split(',')
        .filter_map(|pair| {
            let (key, client) = pair.split_once(':')?;
            let (key, client) = (key.trim(), client.trim());
            if key.is_empty() || client.is_empty() {
                return None;
            }
            Some(ApiKeyEntry {
                key: key.to_string(),
                client_name: client.to_string(),
            })
        })
        .collect()
}
