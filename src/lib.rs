//! Shortest Route - Dijkstra shortest paths over dense adjacency matrices
//!
//! A matrix of directed edge weights is ingested into a freshly owned
//! [`WeightedGraph`], searched with a lazy-deletion priority frontier that
//! stops as soon as the target is settled, and the path is rebuilt from
//! per-vertex back-references.
//!
//! Vertex identities are 0-based inside the graph and 1-based at the
//! interface, matching the route service clients.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod web;

pub use algorithm::{dijkstra::Dijkstra, query::shortest_path, ShortestPathResult};
/// Re-export main types for convenient use
pub use graph::weighted::WeightedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid start or end node: source {0}, target {1}")]
    InvalidEndpoint(usize, usize),

    #[error("Malformed adjacency matrix: {0}")]
    MalformedMatrix(String),

    #[error("Target {1} is unreachable from source {0}")]
    UnreachableTarget(usize, usize),

    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl Error {
    /// True when the error was caused by caller input rather than an engine defect
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::InternalInvariantViolation(_))
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
