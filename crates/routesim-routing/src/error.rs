//! Error types for route computation.

use thiserror::Error;

/// Result type for routing operations.
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur while computing routes or tables.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A source or destination is not part of the topology.
    #[error("router '{0}' does not exist")]
    UnknownRouter(String),

    /// The destination cannot be reached from the source.
    #[error("no path exists from {from} to {to}")]
    NoPath { from: String, to: String },

    /// Dijkstra was asked to run over a link with a negative weight.
    #[error("link {from} -> {to} has negative weight {weight}; use Bellman-Ford")]
    NegativeWeight { from: String, to: String, weight: i64 },

    /// Bellman-Ford found a cycle whose total weight is negative.
    #[error("negative cycle reachable from {0}")]
    NegativeCycle(String),

    /// The cost of a route does not fit the weight type.
    #[error("cost of the route from {from} to {to} overflows")]
    CostOverflow { from: String, to: String },

    /// Writing the CSV export failed.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV writer produced bytes that could not be recovered.
    #[error("CSV export error: {0}")]
    Export(String),
}

impl RoutingError {
    /// Whether this error is the "destination unreachable" outcome rather
    /// than a problem with the request itself.
    pub fn is_no_path(&self) -> bool {
        matches!(self, RoutingError::NoPath { .. })
    }
}
