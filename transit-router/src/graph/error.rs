//! Graph error types.

use super::{EdgeId, VertexId};

/// Errors from graph accessors and reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Vertex id outside `[0, vertex_count)`
    #[error("invalid vertex {vertex}: graph has {vertex_count} vertices")]
    InvalidVertex {
        vertex: VertexId,
        vertex_count: usize,
    },

    /// Edge id outside `[0, edge_count)`
    #[error("invalid edge {edge}: graph has {edge_count} edges")]
    InvalidEdge { edge: EdgeId, edge_count: usize },

    /// Persisted parts don't describe a consistent graph
    #[error("inconsistent incidence lists: {0}")]
    InconsistentIncidence(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::InvalidVertex {
            vertex: 7,
            vertex_count: 4,
        };
        assert_eq!(err.to_string(), "invalid vertex 7: graph has 4 vertices");

        let err = GraphError::InvalidEdge {
            edge: 3,
            edge_count: 0,
        };
        assert_eq!(err.to_string(), "invalid edge 3: graph has 0 edges");

        let err = GraphError::InconsistentIncidence("edge 1 listed twice".into());
        assert_eq!(
            err.to_string(),
            "inconsistent incidence lists: edge 1 listed twice"
        );
    }
}
