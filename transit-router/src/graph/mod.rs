//! Generic append-only directed weighted graph.
//!
//! Vertices are dense integer ids fixed at construction. Edges are appended
//! and never removed, so an `EdgeId` stays valid for the lifetime of the
//! graph and can be stored in side tables (tags, predecessor tables).

mod directed;
mod error;

pub use directed::{DirectedWeightedGraph, Edge, EdgeId, VertexId, Weight};
pub use error::GraphError;
