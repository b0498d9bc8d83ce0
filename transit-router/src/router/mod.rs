//! All-pairs shortest-path router.
//!
//! The router takes ownership of a graph, precomputes a `V × V` table of
//! best weights and predecessor edges once, and then answers path queries
//! from the table without touching it again. Construction is O(V³) time
//! and O(V²) memory.

mod all_pairs;
mod error;

pub use all_pairs::{RouteInfo, RouteInternalData, Router, RoutesInternalData};
pub use error::RouterError;
