//! Error types for the course API client.
//!
//! # Design
//! `SendError` is generic over the transport's own error type so a failure
//! raised before any response existed reaches the caller untouched. The other
//! variants are produced by the client while classifying a response.

use thiserror::Error;

/// Failure of a single `RequestClient::send` call.
#[derive(Error, Debug)]
pub enum SendError<E> {
    /// The transport produced no response (network, DNS, CORS).
    #[error("transport failure: {0}")]
    Transport(E),

    /// A response arrived with a non-2xx status. The body is not read.
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    /// The response body was not valid JSON, or not the requested shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Payload-free tag for branching on the failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    HttpStatus,
    Decode,
}

impl<E> SendError<E> {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::HttpStatus { .. } => FailureKind::HttpStatus,
            Self::Decode(_) => FailureKind::Decode,
        }
    }

    /// Status code for `HttpStatus` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// Recover the transport's error value, if that is what failed.
    pub fn into_transport(self) -> Option<E> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors raised while loading a `ClientConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("environment variable {name} is not valid unicode")]
    NotUnicode { name: &'static str },
}
