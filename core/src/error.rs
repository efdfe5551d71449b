//! Error types for the ticketing API client.
//!
//! # Design
//! Callers distinguish three situations: the request never left the process
//! (bad body, missing automation identity), the service answered with a
//! structured refusal (status and message surfaced verbatim), or something
//! broke in between. Everything in the last bucket collapses to a fixed
//! internal error; the underlying cause is logged, never returned.

use thiserror::Error;

/// Errors returned by every service operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request payload could not be serialized. No network call was made.
    #[error("invalid request body")]
    InvalidBody,

    /// An autocut ticket was requested but the library was constructed
    /// without an automation identity.
    #[error("no automation identity configured")]
    MissingAutomationKey,

    /// The service answered non-200 with a structured error payload;
    /// `status` and `message` are exactly what it sent.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Transport failure, undecodable response, or any error without a
    /// structured shape.
    #[error("internal service error")]
    Internal,
}

impl ApiError {
    /// Numeric status equivalent, following the remote service's convention.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidBody | ApiError::MissingAutomationKey => 400,
            ApiError::Remote { status, .. } => *status,
            ApiError::Internal => 500,
        }
    }
}
