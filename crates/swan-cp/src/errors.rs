//! Error taxonomy for the Computing Provider client.

use crate::transport::{TransportError, status_suffix};

#[derive(Debug, thiserror::Error)]
pub enum SwanError {
    /// Remote service answered with an error status, or the transport reported
    /// an HTTP-protocol failure.
    #[error("swan http error{}: {message}", status_suffix(.status))]
    Http { status: Option<u16>, message: String },
    /// Connectivity, DNS, timeout or body decode failure.
    #[error("swan request error: {0}")]
    Request(String),
    /// Rejected before any request was issued.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A transport failure this operation does not classify, passed through as is.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SwanError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            Self::Transport(TransportError::Http { status, .. }) => *status,
            _ => None,
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}
