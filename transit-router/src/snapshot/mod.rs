//! Router persistence.
//!
//! A built router is saved as one JSON document holding the settings, the
//! name tables, the graph, the edge tags and the routes table. Loading
//! validates every part against the others and never recomputes routes.

mod error;
mod file;

pub use error::SnapshotError;
pub use file::{SNAPSHOT_VERSION, Snapshot, load_router, save_router};
