use std::any::Any;

use aerodex_core::{FailureKind, LookupError};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

const PROBLEM_JSON: &str = "application/problem+json";

/// RFC 7807 problem body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: &'static str,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl Problem {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank",
            title: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_owned(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::to_string(&self).unwrap_or_else(|_| String::from("{}"));
        (status, [(header::CONTENT_TYPE, PROBLEM_JSON)], body).into_response()
    }
}

/// Request-level failure mapped onto an HTTP status.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] LookupError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            FailureKind::InvalidInput => StatusCode::BAD_REQUEST,
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            FailureKind::UpstreamFailure | FailureKind::CircuitOpen => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Problem::new(self.status(), self.0.to_string()).into_response()
    }
}

/// Turns a handler panic into a plain 500 problem response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    tracing::error!(panic = %message, "request handler panicked");

    Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

/// Start-up failures of the web binary, mapped to exit codes.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server stopped unexpectedly: {0}")]
    Serve(#[source] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ServerError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Bind { .. } => 3,
            Self::Serve(_) => 10,
        }
    }
}
