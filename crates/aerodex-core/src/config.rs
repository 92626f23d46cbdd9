//! Start-up configuration for the lookup service.
//!
//! Values are read once when the service is built. Defaults match the
//! production airport route; the web binary overrides them from CLI flags or
//! `AERODEX_*` environment variables.

use std::time::Duration;

use crate::circuit_breaker::CircuitBreakerConfig;
use crate::retry::RetryConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.aviationapi.com";

/// Policy name shared by the retry policy and the circuit breaker.
pub const AIRPORT_POLICY: &str = "airport";

/// Outbound HTTP settings for the provider adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            connect_timeout: Duration::from_millis(3_000),
            read_timeout: Duration::from_millis(5_000),
        }
    }
}

/// Response cache sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub expire_after_write: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 500,
            expire_after_write: Duration::from_secs(15 * 60),
        }
    }
}

/// Everything needed to assemble a [`crate::FacilityLookup`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupConfig {
    pub upstream: UpstreamConfig,
    pub cache: CacheConfig,
    pub retry: RetryConfig,
    pub circuit_breaker: CircuitBreakerConfig,
}
