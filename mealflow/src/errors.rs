//! Error taxonomy for step invocations and pipeline runs.
//!
//! Adapters report [`StepError`]: either `Transient` (the caller should
//! retry) or `Permanent` (retrying cannot help). The retry controller
//! absorbs transient failures and surfaces [`StepFailure`] to the
//! orchestrator once a step is definitively lost.

use thiserror::Error;

/// Failure classes an adapter may report for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// Upstream rate limiting, timeout, or temporary unavailability.
    /// The caller should retry.
    #[error("transient failure: {0}")]
    Transient(String),

    /// Malformed input, validation failure, or a definitive "no result".
    /// The caller must not retry.
    #[error("permanent failure: {0}")]
    Permanent(String),
}

impl StepError {
    /// Creates a transient (retryable) error.
    #[must_use]
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient(message.into())
    }

    /// Creates a permanent (non-retryable) error.
    #[must_use]
    pub fn permanent(message: impl Into<String>) -> Self {
        Self::Permanent(message.into())
    }

    /// Returns true if retrying may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Returns true if retrying cannot help.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Permanent(_))
    }
}

/// Terminal failure of one step, as reported by the retry controller.
///
/// The orchestrator treats both variants identically: the step is lost
/// and no further retries happen at a higher level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepFailure {
    /// The adapter reported a permanent failure; no retries were spent.
    #[error("permanent failure: {0}")]
    Permanent(String),

    /// Every allowed attempt failed transiently.
    #[error("retries exhausted after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Total attempts performed.
        attempts: usize,
        /// Message from the final transient failure.
        last_error: String,
    },
}
