//! Mapping between the generic graph and transit concepts.
//!
//! The graph itself only knows vertex and edge ids. `RouteLayout` records
//! which stop each vertex belongs to, what each edge means (waiting or
//! riding), and the interned stop and bus names.

use serde::{Deserialize, Serialize};

use super::{BusId, LayoutError, NameTable, RoutingSettings, StopId};
use crate::graph::{DirectedWeightedGraph, EdgeId, VertexId};

/// What a vertex stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "stop")]
pub enum VertexRole {
    /// Waiting at the stop for a bus
    Wait(StopId),
    /// Boarded and ready to ride away from the stop
    Ride(StopId),
}

impl VertexRole {
    /// Returns the stop this vertex belongs to.
    pub fn stop(&self) -> StopId {
        match self {
            VertexRole::Wait(stop) | VertexRole::Ride(stop) => *stop,
        }
    }
}

/// What an edge stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EdgeKind {
    /// Waiting for a bus at `stop`
    Wait { stop: StopId },
    /// Riding `bus` across `span_count` stop-to-stop hops
    Ride { bus: BusId, span_count: usize },
}

/// Vertex roles, edge tags and name tables for one route graph.
///
/// # Invariants
///
/// - Stop `s` owns vertex `2s` (waiting) and `2s + 1` (ready to ride)
/// - `edge_kinds[e]` describes graph edge `e`
/// - Every stop has exactly one wait edge, from its wait vertex to its ride vertex
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLayout {
    settings: RoutingSettings,
    stops: NameTable<StopId>,
    buses: NameTable<BusId>,
    vertices: Vec<VertexRole>,
    edge_kinds: Vec<EdgeKind>,
}

impl RouteLayout {
    /// An empty layout, filled in by the builder.
    pub(crate) fn new(settings: RoutingSettings) -> Self {
        Self {
            settings,
            stops: NameTable::new(),
            buses: NameTable::new(),
            vertices: Vec::new(),
            edge_kinds: Vec::new(),
        }
    }

    /// Reassembles a layout from persisted parts.
    ///
    /// Call `check` against the graph before using it.
    pub fn from_parts(
        settings: RoutingSettings,
        stops: NameTable<StopId>,
        buses: NameTable<BusId>,
        vertices: Vec<VertexRole>,
        edge_kinds: Vec<EdgeKind>,
    ) -> Self {
        Self {
            settings,
            stops,
            buses,
            vertices,
            edge_kinds,
        }
    }

    /// Registers a stop and its two vertices. Returns the existing id for a
    /// repeated name.
    pub(crate) fn register_stop(&mut self, name: &str) -> StopId {
        if let Some(id) = self.stops.id(name) {
            return id;
        }
        let id = self.stops.intern(name);
        self.vertices.push(VertexRole::Wait(id));
        self.vertices.push(VertexRole::Ride(id));
        id
    }

    pub(crate) fn register_bus(&mut self, name: &str) -> BusId {
        self.buses.intern(name)
    }

    /// Records the tag of the edge most recently added to the graph.
    pub(crate) fn push_edge_kind(&mut self, kind: EdgeKind) {
        self.edge_kinds.push(kind);
    }

    /// Vertex where a rider waits at `stop`.
    pub fn wait_vertex(stop: StopId) -> VertexId {
        stop.0 * 2
    }

    /// Vertex where a rider has boarded at `stop`.
    pub fn ride_vertex(stop: StopId) -> VertexId {
        stop.0 * 2 + 1
    }

    /// Wait vertex of the stop called `name`.
    pub fn stop_vertex(&self, name: &str) -> Option<VertexId> {
        self.stops.id(name).map(Self::wait_vertex)
    }

    pub fn vertex_role(&self, vertex: VertexId) -> Option<VertexRole> {
        self.vertices.get(vertex).copied()
    }

    pub fn edge_kind(&self, edge: EdgeId) -> Option<EdgeKind> {
        self.edge_kinds.get(edge).copied()
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stops.id(name)
    }

    pub fn stop_name(&self, stop: StopId) -> Option<&str> {
        self.stops.name(stop)
    }

    pub fn bus_name(&self, bus: BusId) -> Option<&str> {
        self.buses.name(bus)
    }

    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    pub fn stops(&self) -> &NameTable<StopId> {
        &self.stops
    }

    pub fn buses(&self) -> &NameTable<BusId> {
        &self.buses
    }

    pub fn vertices(&self) -> &[VertexRole] {
        &self.vertices
    }

    pub fn edge_kinds(&self) -> &[EdgeKind] {
        &self.edge_kinds
    }

    /// Checks the layout describes `graph`.
    pub fn check(&self, graph: &DirectedWeightedGraph<f64>) -> Result<(), LayoutError> {
        let expected_vertices = self.stops.len() * 2;
        if self.vertices.len() != expected_vertices || graph.vertex_count() != expected_vertices {
            return Err(LayoutError(format!(
                "{} stops need {} vertices, layout has {} and graph has {}",
                self.stops.len(),
                expected_vertices,
                self.vertices.len(),
                graph.vertex_count()
            )));
        }

        for idx in 0..self.stops.len() {
            let stop = StopId(idx);
            if self.vertices[Self::wait_vertex(stop)] != VertexRole::Wait(stop)
                || self.vertices[Self::ride_vertex(stop)] != VertexRole::Ride(stop)
            {
                return Err(LayoutError(format!("vertices of stop {idx} are misplaced")));
            }
        }

        if self.edge_kinds.len() != graph.edge_count() {
            return Err(LayoutError(format!(
                "{} edge tags for {} edges",
                self.edge_kinds.len(),
                graph.edge_count()
            )));
        }

        let mut wait_edges = vec![0usize; self.stops.len()];
        for (edge_id, (edge, kind)) in graph.edges().iter().zip(&self.edge_kinds).enumerate() {
            match *kind {
                EdgeKind::Wait { stop } => {
                    if stop.0 >= self.stops.len()
                        || edge.from != Self::wait_vertex(stop)
                        || edge.to != Self::ride_vertex(stop)
                    {
                        return Err(LayoutError(format!(
                            "wait edge {edge_id} doesn't connect its stop's vertices"
                        )));
                    }
                    wait_edges[stop.0] += 1;
                }
                EdgeKind::Ride { bus, span_count } => {
                    let from_ride = matches!(self.vertices[edge.from], VertexRole::Ride(_));
                    let to_wait = matches!(self.vertices[edge.to], VertexRole::Wait(_));
                    if bus.0 >= self.buses.len() || span_count == 0 || !from_ride || !to_wait {
                        return Err(LayoutError(format!("ride edge {edge_id} is malformed")));
                    }
                }
            }
        }

        if let Some(stop) = wait_edges.iter().position(|&count| count != 1) {
            return Err(LayoutError(format!(
                "stop {stop} has {} wait edges",
                wait_edges[stop]
            )));
        }

        Ok(())
    }
}
