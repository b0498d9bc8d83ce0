//! Router error types.

use crate::graph::{EdgeId, GraphError, VertexId};

/// Errors from building or querying a router.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouterError {
    /// Edge with a negative (or unordered, e.g. NaN) weight
    #[error("edge {edge} has negative weight {weight}")]
    NegativeWeight { edge: EdgeId, weight: String },

    /// Invalid vertex or edge id
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Restored table doesn't match the graph
    #[error("routes table is inconsistent with the graph: {0}")]
    InconsistentTable(String),

    /// Predecessor chain doesn't lead back to the origin
    #[error("broken predecessor chain from vertex {from} to vertex {to}")]
    BrokenPath { from: VertexId, to: VertexId },
}
