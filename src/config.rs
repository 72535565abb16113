//! Configuration Module
//!
//! Handles loading and validating server and cache configuration.

use std::env;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::error::{CacheError, Result};

/// Default number of books kept in the cache.
pub const DEFAULT_CAPACITY: usize = 3;

/// Default idle time, in seconds, before a cached book expires.
pub const DEFAULT_TTL_SECS: u64 = 60;

/// Longest accepted idle TTL (100 years). Longer values would overflow the
/// monotonic clock when computing expiry deadlines.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Idle TTL in seconds applied to every cache entry
    pub ttl_secs: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 3)
    /// - `CACHE_TTL_SECS` - Idle TTL in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// A variable that is set but does not parse is rejected rather than
    /// silently replaced by its default.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            capacity: env_or("CACHE_CAPACITY", DEFAULT_CAPACITY)?,
            ttl_secs: env_or("CACHE_TTL_SECS", DEFAULT_TTL_SECS)?,
            server_port: env_or("SERVER_PORT", DEFAULT_PORT)?,
        })
    }

    /// Builds the validated cache parameters from this configuration.
    pub fn cache_config(&self) -> Result<CacheConfig> {
        CacheConfig::new(self.capacity, Duration::from_secs(self.ttl_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ttl_secs: DEFAULT_TTL_SECS,
            server_port: DEFAULT_PORT,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfig(format!("{} has an invalid value: {:?}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

// == Cache Config ==
/// Validated construction parameters of a cache instance.
///
/// Both values are fixed for the lifetime of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    capacity: usize,
    default_ttl: Duration,
}

impl CacheConfig {
    /// Creates a cache configuration.
    ///
    /// Rejects a zero capacity, a zero TTL and a TTL above [`MAX_TTL`].
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "cache capacity must be at least 1".to_string(),
            ));
        }
        if default_ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cache TTL must be greater than zero".to_string(),
            ));
        }
        if default_ttl > MAX_TTL || Instant::now().checked_add(default_ttl).is_none() {
            return Err(CacheError::InvalidConfig(format!(
                "cache TTL must not exceed {} seconds",
                MAX_TTL.as_secs()
            )));
        }

        Ok(Self {
            capacity,
            default_ttl,
        })
    }

    /// Maximum number of live entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Idle time after which an untouched entry is removed.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl: Duration::from_secs(DEFAULT_TTL_SECS),
        }
    }
}
