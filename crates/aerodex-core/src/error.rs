use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::http_client::HttpError;
use crate::LocationCode;

/// Caller-facing message attached to every `ServiceUnavailable` failure.
pub const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable. Try again later.";

/// Input validation errors exposed by `aerodex-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid ICAO code: must be 4 letters (e.g. SBSP), got '{value}'")]
    InvalidLocationCode { value: String },
}

/// Failure classification shared by the retry exclusion list, the fallback
/// step, and the HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidInput,
    NotFound,
    UpstreamFailure,
    CircuitOpen,
    ServiceUnavailable,
}

impl FailureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::UpstreamFailure => "upstream_failure",
            Self::CircuitOpen => "circuit_open",
            Self::ServiceUnavailable => "service_unavailable",
        }
    }
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can be sorted into a [`FailureKind`].
pub trait Classified {
    fn failure_kind(&self) -> FailureKind;
}

/// Generic upstream failure raised by a provider.
///
/// Providers never decide between "not found" and "unavailable"; they either
/// answer (with or without a record) or fail with this error.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("upstream transport failed: {0}")]
    Transport(#[from] HttpError),

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("upstream body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Classified for ProviderError {
    fn failure_kind(&self) -> FailureKind {
        FailureKind::UpstreamFailure
    }
}

/// Outcome of a single breaker-guarded provider attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("no facility found for ICAO {code}")]
    NotFound { code: LocationCode },

    #[error(transparent)]
    Upstream(#[from] ProviderError),

    #[error("circuit breaker '{name}' is open; upstream call skipped")]
    CircuitOpen { name: &'static str },
}

impl Classified for AttemptError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::Upstream(_) => FailureKind::UpstreamFailure,
            Self::CircuitOpen { .. } => FailureKind::CircuitOpen,
        }
    }
}

/// Public lookup error contract.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error("Airport not found for ICAO: {code}")]
    NotFound { code: LocationCode },

    #[error("{message}")]
    ServiceUnavailable {
        message: String,
        #[source]
        source: AttemptError,
    },
}

impl LookupError {
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidInput(_) => FailureKind::InvalidInput,
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::ServiceUnavailable { .. } => FailureKind::ServiceUnavailable,
        }
    }

    /// Funnels an attempt failure into its final public shape.
    pub(crate) fn from_attempt(error: AttemptError) -> Self {
        match error {
            AttemptError::NotFound { code } => Self::NotFound { code },
            other => Self::ServiceUnavailable {
                message: String::from(UNAVAILABLE_MESSAGE),
                source: other,
            },
        }
    }
}

impl Classified for LookupError {
    fn failure_kind(&self) -> FailureKind {
        self.kind()
    }
}
