//! Error types for topology mutations.

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Validation failures. Any of these leaves the topology unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// Router names must contain something other than whitespace.
    #[error("invalid router name: {0:?}")]
    InvalidName(String),

    /// A router with this name already exists.
    #[error("router '{0}' already exists")]
    DuplicateRouter(String),

    /// The named router is not part of the topology.
    #[error("router '{0}' does not exist")]
    UnknownRouter(String),

    /// A link between this ordered pair already exists.
    #[error("link {from} -> {to} already exists")]
    DuplicateLink { from: String, to: String },

    /// There is no link between this ordered pair.
    #[error("link {from} -> {to} does not exist")]
    UnknownLink { from: String, to: String },

    /// Link weights must stay within `±MAX_WEIGHT`.
    #[error("link weight {0} is out of range (limit is ±{max})", max = crate::MAX_WEIGHT)]
    WeightOutOfRange(i64),

    /// Links must connect two different routers.
    #[error("cannot link router '{0}' to itself")]
    SelfLoop(String),
}
