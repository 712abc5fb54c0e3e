//! Error types for the 2Captcha client.

use thiserror::Error;

use crate::types::{Operation, Phase, Stage};

/// Boxed source error from a transport implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a single HTTP exchange
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct TransportError {
    pub stage: Stage,
    #[source]
    pub source: BoxError,
}

impl TransportError {
    pub fn send(source: impl Into<BoxError>) -> Self {
        Self {
            stage: Stage::Send,
            source: source.into(),
        }
    }

    pub fn read(source: impl Into<BoxError>) -> Self {
        Self {
            stage: Stage::Read,
            source: source.into(),
        }
    }
}

/// Errors returned by client operations
#[derive(Debug, Error)]
pub enum SolverError {
    /// Network or body-read failure; never retried
    #[error("{operation}: {phase}: {source}")]
    Transport {
        operation: Operation,
        phase: Phase,
        #[source]
        source: TransportError,
    },

    /// Task stayed not-ready for the whole retry budget
    #[error("{operation}: {phase}: not ready after {attempts} attempts")]
    RetryExhausted {
        operation: Operation,
        phase: Phase,
        attempts: u32,
    },

    /// Service answered with an error line
    #[error("{operation}: {phase}: error response from 2Captcha: {body}")]
    Rejected {
        operation: Operation,
        phase: Phase,
        body: String,
    },

    /// Report response without the confirmation token
    #[error("{operation}: unknown response [{body}] received")]
    MalformedConfirmation { operation: Operation, body: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SolverError {
    /// Returns true if repeating the whole operation later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::RetryExhausted { .. })
    }

    /// Raw response text, when the service produced one
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } | Self::MalformedConfirmation { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Operation the error came from (none for configuration errors)
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Transport { operation, .. }
            | Self::RetryExhausted { operation, .. }
            | Self::Rejected { operation, .. }
            | Self::MalformedConfirmation { operation, .. } => Some(*operation),
            Self::Config(_) => None,
        }
    }
}
