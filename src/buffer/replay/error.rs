//! Errors raised by the shared replay buffer

use thiserror::Error;

/// Failures when recording into or sampling from a [`ReplayBuffer`]
///
/// [`ReplayBuffer`]: super::ReplayBuffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// A sample was requested before the buffer held enough transitions
    #[error("cannot sample {requested} transitions, buffer only holds {available}")]
    InsufficientData {
        /// Transitions asked for
        requested: usize,
        /// Transitions currently stored
        available: usize,
    },

    /// One of the per-agent sequences has the wrong number of entries
    #[error("{field}: expected one entry per agent ({expected}), got {actual}")]
    AgentCountMismatch {
        /// Name of the offending argument
        field: &'static str,
        /// Configured number of agents
        expected: usize,
        /// Entries supplied
        actual: usize,
    },

    /// A per-agent vector has the wrong feature width
    #[error("{field}[{agent}]: expected width {expected}, got {actual}")]
    DimensionMismatch {
        /// Name of the offending argument
        field: &'static str,
        /// Agent whose vector is malformed
        agent: usize,
        /// Configured width
        expected: usize,
        /// Width supplied
        actual: usize,
    },

    /// Batch size of zero
    #[error("batch size must be positive")]
    InvalidBatchSize,
}

/// Result alias for replay buffer operations
pub type ReplayResult<T> = std::result::Result<T, ReplayError>;
