//! Provider port.
//!
//! This module defines the contract (`FacilityProvider`) that an upstream
//! facility data source must follow. The lookup orchestrator depends only on
//! this trait, so a second upstream can be added as another implementation
//! without touching the orchestration code.
//!
//! # Example Implementation
//!
//! ```rust
//! use std::future::Future;
//! use std::pin::Pin;
//!
//! use aerodex_core::{FacilityProvider, FacilityRecord, LocationCode, ProviderError};
//!
//! struct StaticProvider;
//!
//! impl FacilityProvider for StaticProvider {
//!     fn name(&self) -> &str {
//!         "static"
//!     }
//!
//!     fn fetch<'a>(
//!         &'a self,
//!         code: &'a LocationCode,
//!     ) -> Pin<Box<dyn Future<Output = Result<Option<FacilityRecord>, ProviderError>> + Send + 'a>>
//!     {
//!         Box::pin(async move {
//!             Ok(Some(FacilityRecord {
//!                 icao_ident: Some(code.to_string()),
//!                 ..FacilityRecord::default()
//!             }))
//!         })
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::{FacilityRecord, LocationCode, ProviderError};

/// Boxed future returned by [`FacilityProvider::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<FacilityRecord>, ProviderError>> + Send + 'a>>;

/// Upstream facility data source.
///
/// Implementations must be `Send + Sync` as a single instance is shared by
/// every in-flight lookup.
pub trait FacilityProvider: Send + Sync {
    /// Human-readable provider name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Fetches the facility record for an already-normalized code.
    ///
    /// `Ok(None)` means the provider answered and has no record for the code.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] for any transport, status, or decode problem.
    fn fetch<'a>(&'a self, code: &'a LocationCode) -> FetchFuture<'a>;
}
