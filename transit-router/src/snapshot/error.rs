//! Snapshot error types.

use std::path::PathBuf;

use crate::graph::GraphError;
use crate::router::RouterError;
use crate::transit::{LayoutError, SettingsError};

/// Errors that can occur when saving or loading a router snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed
    #[error("snapshot file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot isn't valid JSON or has the wrong shape
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot was written by an incompatible format version
    #[error("unsupported snapshot version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Stored routing settings are out of range
    #[error("snapshot settings: {0}")]
    Settings(#[from] SettingsError),

    /// Stored graph is malformed
    #[error("snapshot graph: {0}")]
    Graph(#[from] GraphError),

    /// Stored routes table doesn't match the graph
    #[error("snapshot routes: {0}")]
    Router(#[from] RouterError),

    /// Stored layout doesn't match the graph
    #[error("snapshot layout: {0}")]
    Layout(#[from] LayoutError),

    /// Any other structural problem
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SnapshotError::UnsupportedVersion {
            found: 7,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "unsupported snapshot version 7, expected 1"
        );

        let err = SnapshotError::Corrupt("duplicate stop name A".to_string());
        assert_eq!(err.to_string(), "corrupt snapshot: duplicate stop name A");

        let err = SnapshotError::Graph(GraphError::InvalidVertex {
            vertex: 9,
            vertex_count: 4,
        });
        assert_eq!(
            err.to_string(),
            "snapshot graph: invalid vertex 9: graph has 4 vertices"
        );

        let err = SnapshotError::Io {
            path: PathBuf::from("base.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "snapshot file base.json: missing");
    }
}
