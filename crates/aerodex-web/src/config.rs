//! Command-line and environment configuration for the web binary.
//!
//! Every flag can also be set through its `AERODEX_*` environment variable.
//! Values are read once at start-up.
//!
//! | Option | Default |
//! |--------|---------|
//! | `--bind` | `0.0.0.0:8080` |
//! | `--base-url` | `https://api.aviationapi.com` |
//! | `--connect-timeout-ms` | `3000` |
//! | `--read-timeout-ms` | `5000` |
//! | `--cache-max-entries` | `500` |
//! | `--cache-expire-minutes` | `15` |
//! | `--retry-max-attempts` | `3` |
//! | `--retry-wait-ms` | `500` |
//! | `--breaker-failure-rate` | `50` |
//! | `--breaker-window-size` | `10` |
//! | `--breaker-minimum-calls` | `5` |
//! | `--breaker-open-wait-secs` | `30` |
//! | `--breaker-half-open-calls` | `10` |

use std::time::Duration;

use aerodex_core::{
    CacheConfig, CircuitBreakerConfig, LookupConfig, RetryConfig, UpstreamConfig,
    DEFAULT_BASE_URL,
};
use clap::Parser;

use crate::error::ServerError;

/// Aerodex - resilient airport lookup by ICAO code
#[derive(Debug, Clone, Parser)]
#[command(name = "aerodex", author, version, about = "Resilient airport lookup service")]
pub struct Settings {
    /// Socket address the HTTP server listens on.
    #[arg(long, env = "AERODEX_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Base URL of the aviationapi.com compatible upstream.
    #[arg(long, env = "AERODEX_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "AERODEX_API_CONNECT_TIMEOUT_MS", default_value_t = 3_000)]
    pub connect_timeout_ms: u64,

    #[arg(long, env = "AERODEX_API_READ_TIMEOUT_MS", default_value_t = 5_000)]
    pub read_timeout_ms: u64,

    /// Maximum number of cached facilities; 0 disables the cache.
    #[arg(long, env = "AERODEX_CACHE_MAX_ENTRIES", default_value_t = 500)]
    pub cache_max_entries: usize,

    /// Minutes a cached facility stays valid after it was written.
    #[arg(long, env = "AERODEX_CACHE_EXPIRE_MINUTES", default_value_t = 15)]
    pub cache_expire_minutes: u64,

    #[arg(long, env = "AERODEX_RETRY_MAX_ATTEMPTS", default_value_t = 3)]
    pub retry_max_attempts: u32,

    #[arg(long, env = "AERODEX_RETRY_WAIT_MS", default_value_t = 500)]
    pub retry_wait_ms: u64,

    /// Failure percentage at which the circuit opens.
    #[arg(long, env = "AERODEX_BREAKER_FAILURE_RATE", default_value_t = 50.0)]
    pub breaker_failure_rate: f32,

    #[arg(long, env = "AERODEX_BREAKER_WINDOW_SIZE", default_value_t = 10)]
    pub breaker_window_size: usize,

    #[arg(long, env = "AERODEX_BREAKER_MINIMUM_CALLS", default_value_t = 5)]
    pub breaker_minimum_calls: usize,

    #[arg(long, env = "AERODEX_BREAKER_OPEN_WAIT_SECS", default_value_t = 30)]
    pub breaker_open_wait_secs: u64,

    #[arg(long, env = "AERODEX_BREAKER_HALF_OPEN_CALLS", default_value_t = 10)]
    pub breaker_half_open_calls: usize,
}

impl Settings {
    /// Validates ranges clap cannot express and builds the core configuration.
    pub fn lookup_config(&self) -> Result<LookupConfig, ServerError> {
        if !(self.breaker_failure_rate > 0.0 && self.breaker_failure_rate <= 100.0) {
            return Err(ServerError::Config(format!(
                "breaker failure rate must be in (0, 100], got {}",
                self.breaker_failure_rate
            )));
        }
        if self.breaker_window_size == 0 {
            return Err(ServerError::Config(String::from(
                "breaker window size must be at least 1",
            )));
        }

        let expire_secs = self.cache_expire_minutes.checked_mul(60).ok_or_else(|| {
            ServerError::Config(format!(
                "cache expiry of {} minutes is out of range",
                self.cache_expire_minutes
            ))
        })?;

        Ok(LookupConfig {
            upstream: UpstreamConfig {
                base_url: self.base_url.clone(),
                connect_timeout: Duration::from_millis(self.connect_timeout_ms),
                read_timeout: Duration::from_millis(self.read_timeout_ms),
            },
            cache: CacheConfig {
                max_entries: self.cache_max_entries,
                expire_after_write: Duration::from_secs(expire_secs),
            },
            retry: RetryConfig::fixed(
                Duration::from_millis(self.retry_wait_ms),
                self.retry_max_attempts,
            ),
            circuit_breaker: CircuitBreakerConfig {
                failure_rate_threshold: self.breaker_failure_rate,
                sliding_window_size: self.breaker_window_size,
                minimum_calls: self.breaker_minimum_calls,
                open_wait: Duration::from_secs(self.breaker_open_wait_secs),
                half_open_calls: self.breaker_half_open_calls,
            },
        })
    }
}
