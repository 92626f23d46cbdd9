//! Upstream provider adapters.

mod aviation_api;

pub use aviation_api::AviationApiProvider;
