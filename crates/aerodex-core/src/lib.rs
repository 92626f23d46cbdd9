//! # Aerodex Core
//!
//! Resilient airport facility lookup by ICAO code.
//!
//! ## Overview
//!
//! - **Location codes**: validated, upper-cased 4-letter ICAO codes
//! - **Provider port** with one adapter for aviationapi.com
//! - **Circuit breaker** with a count-based sliding window
//! - **Retry policy** with a fixed wait and a failure-kind exclusion list
//! - **Response cache** with write-age expiry and oldest-write eviction
//! - **Lookup orchestrator** tying the above together behind one call
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (aviationapi.com) |
//! | [`cache`] | Bounded write-expiring cache |
//! | [`circuit_breaker`] | Circuit breaker for upstream calls |
//! | [`config`] | Start-up configuration and defaults |
//! | [`domain`] | Location code and facility payloads |
//! | [`error`] | Error taxonomy |
//! | [`http_client`] | HTTP client abstraction |
//! | [`lookup`] | Lookup orchestrator |
//! | [`provider`] | Provider trait |
//! | [`retry`] | Retry policy |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aerodex_core::{FacilityLookup, LookupConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lookup = FacilityLookup::from_config(&LookupConfig::default());
//!
//!     let airport = lookup.get_by_code("kspg").await?;
//!     println!("{:?}", airport.facility_name);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  HTTP / Caller  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ FacilityLookup  │────▶│  Response Cache  │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Retry Policy   │────▶│ Circuit Breaker  │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │
//!                                  ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ HTTP Client     │◀────│ FacilityProvider │
//! │ (reqwest)       │     │ (Adapter Trait)  │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Callers only ever see the four public kinds:
//!
//! ```rust
//! use aerodex_core::{FailureKind, LookupError};
//!
//! fn status_for(error: &LookupError) -> u16 {
//!     match error.kind() {
//!         FailureKind::InvalidInput => 400,
//!         FailureKind::NotFound => 404,
//!         FailureKind::ServiceUnavailable => 503,
//!         _ => 500,
//!     }
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod circuit_breaker;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod lookup;
pub mod provider;
pub mod retry;

// Adapter implementations
pub use adapters::AviationApiProvider;

// Caching
pub use cache::CacheStore;

// Circuit breaker
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitError, CircuitState};

// Configuration
pub use config::{CacheConfig, LookupConfig, UpstreamConfig, AIRPORT_POLICY, DEFAULT_BASE_URL};

// Domain models
pub use domain::{FacilityRecord, FacilityResponse, LocationCode};

// Error types
pub use error::{
    AttemptError, Classified, FailureKind, LookupError, ProviderError, ValidationError,
    UNAVAILABLE_MESSAGE,
};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Lookup orchestrator
pub use lookup::FacilityLookup;

// Provider port
pub use provider::{FacilityProvider, FetchFuture};

// Retry logic
pub use retry::{RetryConfig, RetryPolicy};
