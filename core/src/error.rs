//! Error taxonomy for the dispatcher core.
//!
//! # Design
//! Four kinds cover every failure mode: a missing credential
//! (`Configuration`), a caller mistake such as an unknown operation or a
//! missing `id` (`Protocol`), a non-success status from the remote service
//! (`Upstream`, carrying status/status-text/body for diagnosis), and a
//! request that never produced a response (`Transport`). Messages name the
//! attempted endpoint so failures are diagnosable from the envelope alone.
//! All four are converted to a `Envelope` at the dispatcher boundary; none
//! propagate to the protocol transport as raw errors.

use serde::Serialize;
use thiserror::Error;

/// Errors produced while planning or executing an operation.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable credential is configured. Fatal for every dispatch until
    /// the environment is fixed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The caller violated the operation contract (unknown operation name,
    /// missing required argument).
    #[error("{0}")]
    Protocol(String),

    /// The remote service answered with a non-success status.
    #[error("{endpoint} returned HTTP {status} {status_text}: {body}")]
    Upstream {
        endpoint: String,
        status: u16,
        status_text: String,
        body: String,
    },

    /// No response reached us at all (DNS, connect, broken transport).
    #[error("{endpoint} failed before a response arrived: {message}")]
    Transport { endpoint: String, message: String },
}

/// Wire-visible error classification carried in failure envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "ConfigurationError")]
    Configuration,
    #[serde(rename = "ProtocolError")]
    Protocol,
    #[serde(rename = "UpstreamError")]
    Upstream,
    #[serde(rename = "TransportError")]
    Transport,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Protocol(_) => ErrorKind::Protocol,
            Error::Upstream { .. } => ErrorKind::Upstream,
            Error::Transport { .. } => ErrorKind::Transport,
        }
    }
}
