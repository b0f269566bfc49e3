//! Gateway error type.
//!
//! Every generation operation fails into one of these variants; callers
//! upstream decide whether a failure is absorbed (mock substitution) or
//! merely degrades the display.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by the generation gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The HTTP exchange itself failed or returned a non-success status.
    #[error("Gateway request failed (status: {status_code:?}): {message}")]
    Process {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The generator answered, but not in the agreed shape.
    #[error("Malformed generator output: {0}")]
    MalformedOutput(String),

    /// A generation job reported a terminal error status.
    #[error("Generation failed: {0}")]
    ExecutionFailed(String),

    /// Gateway configuration could not be loaded.
    #[error("Gateway configuration error: {0}")]
    Config(String),

    /// Every generation in a batch failed while at least one was requested.
    /// Distinguishes "everything failed" from "nothing requested".
    #[error("All {requested} requested generations failed")]
    AllGenerationsFailed { requested: usize },
}

impl GatewayError {
    /// Creates a Process error without retry-after metadata.
    pub fn process(
        status_code: Option<u16>,
        message: impl Into<String>,
        is_retryable: bool,
    ) -> Self {
        Self::Process {
            status_code,
            message: message.into(),
            is_retryable,
            retry_after: None,
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Process {
                is_retryable: true,
                ..
            }
        )
    }
}

/// A type alias for `Result<T, GatewayError>`.
pub type Result<T> = std::result::Result<T, GatewayError>;
