//! JSON snapshot of a built transit router.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::SnapshotError;
use crate::graph::{DirectedWeightedGraph, Edge, EdgeId};
use crate::router::{RouteInternalData, Router, RoutesInternalData};
use crate::transit::{EdgeKind, NameTable, RouteLayout, RoutingSettings, TransitRouter, VertexRole};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to answer queries without rebuilding.
///
/// Restoring a snapshot reproduces the saved router exactly: same vertex
/// and edge ids, same weights, same routes table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version, see [`SNAPSHOT_VERSION`].
    pub version: u32,

    pub settings: RoutingSettings,

    /// Stop names in id order.
    pub stops: Vec<String>,

    /// Bus names in id order.
    pub buses: Vec<String>,

    /// Role of every vertex, indexed by vertex id.
    pub vertices: Vec<VertexRole>,

    /// Graph edges, indexed by edge id.
    pub edges: Vec<Edge<f64>>,

    /// Tag of every edge, indexed by edge id.
    pub edge_kinds: Vec<EdgeKind>,

    /// Outgoing edge ids of every vertex.
    pub incidence_lists: Vec<Vec<EdgeId>>,

    /// Routes table cells in row-major order.
    pub routes: Vec<Option<RouteInternalData<f64>>>,
}

impl Snapshot {
    /// Captures the full state of `router`.
    pub fn from_router(router: &TransitRouter) -> Self {
        let layout = router.layout();
        let graph = router.router().graph();

        Self {
            version: SNAPSHOT_VERSION,
            settings: *layout.settings(),
            stops: layout.stops().names().to_vec(),
            buses: layout.buses().names().to_vec(),
            vertices: layout.vertices().to_vec(),
            edges: graph.edges().to_vec(),
            edge_kinds: layout.edge_kinds().to_vec(),
            incidence_lists: graph.incidence_lists().to_vec(),
            routes: router.router().routes().cells().to_vec(),
        }
    }

    /// Validates the snapshot and rebuilds the router from it.
    ///
    /// No routes are recomputed.
    pub fn into_router(self) -> Result<TransitRouter, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        self.settings.validate()?;

        let stops = NameTable::from_names(self.stops)
            .map_err(|name| SnapshotError::Corrupt(format!("duplicate stop name {name}")))?;
        let buses = NameTable::from_names(self.buses)
            .map_err(|name| SnapshotError::Corrupt(format!("duplicate bus name {name}")))?;

        let vertex_count = self.vertices.len();
        let graph =
            DirectedWeightedGraph::from_parts(vertex_count, self.edges, self.incidence_lists)?;
        let routes = RoutesInternalData::from_cells(vertex_count, self.routes)?;
        let router = Router::from_parts(graph, routes)?;

        let layout = RouteLayout::from_parts(
            self.settings,
            stops,
            buses,
            self.vertices,
            self.edge_kinds,
        );

        Ok(TransitRouter::from_parts(layout, router)?)
    }

    /// Writes the snapshot as JSON to `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let io_error = |source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string(self)?;
        std::fs::write(path, json).map_err(io_error)?;

        debug!(
            path = %path.display(),
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    /// Reads a snapshot from `path` without validating it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_str(&contents)?;

        debug!(
            path = %path.display(),
            version = snapshot.version,
            vertices = snapshot.vertices.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }
}

/// Saves `router` to `path`.
pub fn save_router(router: &TransitRouter, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    Snapshot::from_router(router).save(path)
}

/// Loads and validates a router saved with [`save_router`].
pub fn load_router(path: impl AsRef<Path>) -> Result<TransitRouter, SnapshotError> {
    Snapshot::load(path)?.into_router()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transit::{BusRoute, InMemoryCatalogue, StopId};
    use tempfile::tempdir;

    /// Awkward weights on purpose: 37 km/h gives times with long fractions.
    fn sample_router() -> TransitRouter {
        let mut catalogue = InMemoryCatalogue::new();
        catalogue.set_distance("Tolstopaltsevo", "Marushkino", 3900);
        catalogue.set_distance("Marushkino", "Rasskazovka", 9900);
        catalogue.set_distance("Marushkino", "Marushkino", 100);
        catalogue.set_distance("Rasskazovka", "Marushkino", 9500);
        catalogue.set_distance("Biryulyovo Zapadnoye", "Universam", 2400);
        catalogue.set_distance("Universam", "Biryulyovo Tovarnaya", 1380);
        catalogue.set_distance("Biryulyovo Tovarnaya", "Biryulyovo Zapadnoye", 1250);
        catalogue.add_stop("Depot");

        catalogue.add_bus(BusRoute::new(
            "750",
            false,
            &["Tolstopaltsevo", "Marushkino", "Marushkino", "Rasskazovka"],
        ));
        catalogue.add_bus(BusRoute::new(
            "256",
            true,
            &[
                "Biryulyovo Zapadnoye",
                "Universam",
                "Biryulyovo Tovarnaya",
                "Biryulyovo Zapadnoye",
            ],
        ));

        TransitRouter::build(&catalogue, RoutingSettings::new(6.3, 37.0)).unwrap()
    }

    #[test]
    fn save_and_load_answers_identically() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("base.json");
        let router = sample_router();

        save_router(&router, &path).unwrap();
        let restored = load_router(&path).unwrap();

        assert_eq!(restored.layout(), router.layout());
        assert_eq!(restored.router().graph(), router.router().graph());
        assert_eq!(restored.router().routes(), router.router().routes());

        let names = router.layout().stops().names();
        for from in names {
            for to in names {
                assert_eq!(
                    restored.route(from, to),
                    router.route(from, to),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn snapshot_survives_json_exactly() {
        let snapshot = Snapshot::from_router(&sample_router());

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("base.json");

        save_router(&sample_router(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_router("/nonexistent/path/base.json");
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }

    #[test]
    fn garbage_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("base.json");
        std::fs::write(&path, "{\"version\": 1, \"stops\": [").unwrap();

        assert!(matches!(load_router(&path), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn rejects_other_version() {
        let mut snapshot = Snapshot::from_router(&sample_router());
        snapshot.version = SNAPSHOT_VERSION + 1;

        assert!(matches!(
            snapshot.into_router(),
            Err(SnapshotError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn rejects_duplicate_stop_names() {
        let mut snapshot = Snapshot::from_router(&sample_router());
        snapshot.stops[1] = snapshot.stops[0].clone();

        assert!(matches!(
            snapshot.into_router(),
            Err(SnapshotError::Corrupt(_))
        ));
    }

    #[test]
    fn rejects_truncated_routes() {
        let mut snapshot = Snapshot::from_router(&sample_router());
        snapshot.routes.pop();

        assert!(matches!(
            snapshot.into_router(),
            Err(SnapshotError::Router(_))
        ));
    }

    #[test]
    fn rejects_dangling_edge() {
        let mut snapshot = Snapshot::from_router(&sample_router());
        snapshot.edges[0].to = snapshot.vertices.len();

        assert!(matches!(
            snapshot.into_router(),
            Err(SnapshotError::Graph(_))
        ));
    }

    #[test]
    fn rejects_retagged_edge() {
        let mut snapshot = Snapshot::from_router(&sample_router());
        // Edge 0 is the wait edge of stop 0; claim it belongs to stop 1
        snapshot.edge_kinds[0] = EdgeKind::Wait { stop: StopId(1) };

        assert!(matches!(
            snapshot.into_router(),
            Err(SnapshotError::Layout(_))
        ));
    }

    #[test]
    fn rejects_bad_settings() {
        let mut snapshot = Snapshot::from_router(&sample_router());
        snapshot.settings.bus_velocity = 0.0;

        assert!(matches!(
            snapshot.into_router(),
            Err(SnapshotError::Settings(_))
        ));
    }
}
