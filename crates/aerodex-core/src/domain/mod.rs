//! # Domain Models
//!
//! Lookup key and facility payload types.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`LocationCode`] | Validated, upper-cased 4-letter ICAO code |
//! | [`FacilityRecord`] | Raw provider record (snake_case wire format) |
//! | [`FacilityResponse`] | Public response (camelCase wire format) |
//!
//! ## Validation
//!
//! Only the location code is validated. Facility attributes are opaque strings
//! passed through from the provider untouched:
//!
//! ```rust
//! use aerodex_core::{LocationCode, ValidationError};
//!
//! let code = LocationCode::parse(" sbsp ").unwrap();
//! assert_eq!(code.as_str(), "SBSP");
//!
//! let invalid = LocationCode::parse("XX");
//! assert!(matches!(invalid, Err(ValidationError::InvalidLocationCode { .. })));
//! ```

mod facility;
mod location_code;

pub use facility::{FacilityRecord, FacilityResponse};
pub use location_code::LocationCode;
