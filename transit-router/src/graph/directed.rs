//! Directed weighted graph with per-vertex incidence lists.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::GraphError;

/// Dense vertex identifier in `[0, vertex_count)`.
pub type VertexId = usize;

/// Edge identifier, assigned in insertion order starting at 0.
pub type EdgeId = usize;

/// Requirements on an edge weight.
///
/// `Default` must be the zero weight. Implemented for the primitive
/// integer and float types.
pub trait Weight: Copy + PartialOrd + Add<Output = Self> + Default + fmt::Debug {
    /// Whether two sums of the same weights agree.
    ///
    /// Exact for integers. Floats allow for the rounding left by adding the
    /// same terms in a different order.
    fn sums_agree(self, other: Self) -> bool;
}

macro_rules! exact_weight {
    ($($ty:ty),*) => {
        $(impl Weight for $ty {
            fn sums_agree(self, other: Self) -> bool {
                self == other
            }
        })*
    };
}

macro_rules! float_weight {
    ($($ty:ty => $tolerance:expr),*) => {
        $(impl Weight for $ty {
            fn sums_agree(self, other: Self) -> bool {
                let scale = self.abs().max(other.abs()).max(1.0);
                (self - other).abs() <= $tolerance * scale
            }
        })*
    };
}

exact_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
float_weight!(f32 => 1e-5, f64 => 1e-9);

/// A directed edge `from -> to` with a weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge<W> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
}

impl<W> Edge<W> {
    /// Creates a new edge.
    pub fn new(from: VertexId, to: VertexId, weight: W) -> Self {
        Self { from, to, weight }
    }
}

/// Append-only directed graph.
///
/// # Invariants
///
/// - The vertex count is fixed at construction
/// - Edge ids are dense and never reused
/// - Each edge id appears in exactly one incidence list: that of its `from` vertex
/// - Incidence lists are in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedWeightedGraph<W> {
    edges: Vec<Edge<W>>,
    incidence_lists: Vec<Vec<EdgeId>>,
}

impl<W: Weight> DirectedWeightedGraph<W> {
    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence_lists: vec![Vec::new(); vertex_count],
        }
    }

    /// Rebuilds a graph from persisted parts.
    ///
    /// Every edge must appear exactly once, in the incidence list of its
    /// `from` vertex, and both endpoints must be in range.
    pub fn from_parts(
        vertex_count: usize,
        edges: Vec<Edge<W>>,
        incidence_lists: Vec<Vec<EdgeId>>,
    ) -> Result<Self, GraphError> {
        if incidence_lists.len() != vertex_count {
            return Err(GraphError::InconsistentIncidence(format!(
                "{} incidence lists for {} vertices",
                incidence_lists.len(),
                vertex_count
            )));
        }

        for edge in &edges {
            for vertex in [edge.from, edge.to] {
                if vertex >= vertex_count {
                    return Err(GraphError::InvalidVertex {
                        vertex,
                        vertex_count,
                    });
                }
            }
        }

        let mut seen = vec![false; edges.len()];
        for (vertex, list) in incidence_lists.iter().enumerate() {
            for &edge_id in list {
                let edge = edges.get(edge_id).ok_or(GraphError::InvalidEdge {
                    edge: edge_id,
                    edge_count: edges.len(),
                })?;
                if edge.from != vertex {
                    return Err(GraphError::InconsistentIncidence(format!(
                        "edge {edge_id} starts at {} but is listed under {vertex}",
                        edge.from
                    )));
                }
                if std::mem::replace(&mut seen[edge_id], true) {
                    return Err(GraphError::InconsistentIncidence(format!(
                        "edge {edge_id} listed twice"
                    )));
                }
            }
        }

        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(GraphError::InconsistentIncidence(format!(
                "edge {missing} is not in any incidence list"
            )));
        }

        Ok(Self {
            edges,
            incidence_lists,
        })
    }

    /// Appends an edge and returns its id.
    pub fn add_edge(&mut self, edge: Edge<W>) -> Result<EdgeId, GraphError> {
        self.check_vertex(edge.from)?;
        self.check_vertex(edge.to)?;

        let id = self.edges.len();
        self.incidence_lists[edge.from].push(id);
        self.edges.push(edge);
        Ok(id)
    }

    /// Returns the edge with the given id.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge<W>, GraphError> {
        self.edges.get(id).ok_or(GraphError::InvalidEdge {
            edge: id,
            edge_count: self.edges.len(),
        })
    }

    /// Returns the outgoing edge ids of `vertex`, in insertion order.
    pub fn incident_edges(&self, vertex: VertexId) -> Result<&[EdgeId], GraphError> {
        self.check_vertex(vertex)?;
        Ok(&self.incidence_lists[vertex])
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence_lists.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    /// Per-vertex incidence lists, indexed by vertex id.
    pub fn incidence_lists(&self) -> &[Vec<EdgeId>] {
        &self.incidence_lists
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }
}
