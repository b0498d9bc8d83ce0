//! Transitive-closure relaxation over every vertex pair.
//!
//! Floyd–Warshall style: each vertex in turn is tried as an intermediate for
//! every `(from, to)` pair. Alongside the weight, each cell keeps the last
//! edge of its best path, which is enough to walk the path backwards.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::RouterError;
use crate::graph::{DirectedWeightedGraph, EdgeId, GraphError, VertexId, Weight};

/// Best known route for one ordered vertex pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteInternalData<W> {
    /// Total weight of the route.
    pub weight: W,
    /// Last edge on the route, `None` for the empty route `v -> v`.
    pub prev_edge: Option<EdgeId>,
}

/// `V × V` table of best routes, stored row-major.
///
/// Cell `(from, to)` is `None` when `to` is unreachable from `from`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutesInternalData<W> {
    vertex_count: usize,
    cells: Vec<Option<RouteInternalData<W>>>,
}

impl<W: Weight> RoutesInternalData<W> {
    fn empty(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            cells: vec![None; vertex_count * vertex_count],
        }
    }

    /// Rebuilds a table from its row-major cells.
    pub fn from_cells(
        vertex_count: usize,
        cells: Vec<Option<RouteInternalData<W>>>,
    ) -> Result<Self, RouterError> {
        if cells.len() != vertex_count * vertex_count {
            return Err(RouterError::InconsistentTable(format!(
                "{} cells for {} vertices",
                cells.len(),
                vertex_count
            )));
        }
        Ok(Self {
            vertex_count,
            cells,
        })
    }

    /// Returns the best route from `from` to `to`, if one exists.
    ///
    /// Both ids must be below `vertex_count()`.
    pub fn get(&self, from: VertexId, to: VertexId) -> Option<&RouteInternalData<W>> {
        self.cells[self.index(from, to)].as_ref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Option<RouteInternalData<W>>] {
        &self.cells
    }

    fn index(&self, from: VertexId, to: VertexId) -> usize {
        from * self.vertex_count + to
    }

    fn relax(
        &mut self,
        from: VertexId,
        to: VertexId,
        first: RouteInternalData<W>,
        second: RouteInternalData<W>,
    ) {
        let candidate = first.weight + second.weight;
        let idx = self.index(from, to);
        let better = match &self.cells[idx] {
            None => true,
            Some(current) => candidate < current.weight,
        };
        if better {
            self.cells[idx] = Some(RouteInternalData {
                weight: candidate,
                prev_edge: second.prev_edge.or(first.prev_edge),
            });
        }
    }
}

/// A reconstructed route: total weight and edges from origin to target.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo<W> {
    pub weight: W,
    pub edges: Vec<EdgeId>,
}

/// All-pairs shortest-path router over an owned graph.
///
/// Immutable once built; queries take `&self` and may run from many threads.
#[derive(Debug, Clone)]
pub struct Router<W> {
    graph: DirectedWeightedGraph<W>,
    routes: RoutesInternalData<W>,
}

impl<W: Weight> Router<W> {
    /// Builds the full routes table for `graph`.
    ///
    /// # Errors
    ///
    /// Returns `NegativeWeight` if any edge weight is below zero or not
    /// comparable with zero. The check runs before any relaxation.
    pub fn new(graph: DirectedWeightedGraph<W>) -> Result<Self, RouterError> {
        check_weights(&graph)?;

        let vertex_count = graph.vertex_count();
        let mut routes = RoutesInternalData::empty(vertex_count);
        initialize(&graph, &mut routes);

        for through in 0..vertex_count {
            relax_through(&mut routes, through);
        }

        debug!(
            vertices = vertex_count,
            edges = graph.edge_count(),
            "Routes table computed"
        );

        Ok(Self { graph, routes })
    }

    /// Pairs a graph with a previously computed routes table.
    ///
    /// Checks that the table matches the graph's dimensions, that every
    /// vertex reaches itself with zero weight and no edges, and that every
    /// predecessor edge ends at its cell's target with the cell's weight
    /// equal to the route up to the edge plus the edge itself.
    pub fn from_parts(
        graph: DirectedWeightedGraph<W>,
        routes: RoutesInternalData<W>,
    ) -> Result<Self, RouterError> {
        check_weights(&graph)?;

        if routes.vertex_count() != graph.vertex_count() {
            return Err(RouterError::InconsistentTable(format!(
                "table has {} vertices, graph has {}",
                routes.vertex_count(),
                graph.vertex_count()
            )));
        }

        let vertex_count = graph.vertex_count();
        for vertex in 0..vertex_count {
            let zero_route = matches!(
                routes.get(vertex, vertex),
                Some(route) if route.prev_edge.is_none() && route.weight == W::default()
            );
            if !zero_route {
                return Err(RouterError::InconsistentTable(format!(
                    "cell ({vertex}, {vertex}) is not the empty route"
                )));
            }
        }

        for from in 0..vertex_count {
            for to in 0..vertex_count {
                let Some(route) = routes.get(from, to) else {
                    continue;
                };
                let Some(prev_edge) = route.prev_edge else {
                    if from != to {
                        return Err(RouterError::InconsistentTable(format!(
                            "cell ({from}, {to}) has no predecessor edge"
                        )));
                    }
                    continue;
                };
                let edge = graph.edge(prev_edge)?;
                let Some(before) = routes.get(from, edge.from).filter(|_| edge.to == to) else {
                    return Err(RouterError::InconsistentTable(format!(
                        "cell ({from}, {to}) has predecessor edge {prev_edge} that doesn't lead there"
                    )));
                };
                if !route.weight.sums_agree(before.weight + edge.weight) {
                    return Err(RouterError::InconsistentTable(format!(
                        "cell ({from}, {to}) weighs {:?} but its path weighs {:?}",
                        route.weight,
                        before.weight + edge.weight
                    )));
                }
            }
        }

        Ok(Self { graph, routes })
    }

    /// Reconstructs the best route from `from` to `to`.
    ///
    /// Returns `Ok(None)` when `to` is unreachable from `from`. A vertex
    /// always reaches itself with zero weight and no edges.
    pub fn build_route(
        &self,
        from: VertexId,
        to: VertexId,
    ) -> Result<Option<RouteInfo<W>>, RouterError> {
        for vertex in [from, to] {
            if vertex >= self.graph.vertex_count() {
                return Err(GraphError::InvalidVertex {
                    vertex,
                    vertex_count: self.graph.vertex_count(),
                }
                .into());
            }
        }

        let Some(route) = self.routes.get(from, to) else {
            trace!(from, to, "No route");
            return Ok(None);
        };

        let mut edges = Vec::new();
        let mut prev_edge = route.prev_edge;
        while let Some(edge_id) = prev_edge {
            // A valid chain visits each edge at most once
            if edges.len() >= self.graph.edge_count() {
                return Err(RouterError::BrokenPath { from, to });
            }
            edges.push(edge_id);
            let edge = self.graph.edge(edge_id)?;
            prev_edge = self
                .routes
                .get(from, edge.from)
                .ok_or(RouterError::BrokenPath { from, to })?
                .prev_edge;
        }
        edges.reverse();

        trace!(from, to, edges = edges.len(), "Route rebuilt");

        Ok(Some(RouteInfo {
            weight: route.weight,
            edges,
        }))
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<W> {
        &self.graph
    }

    pub fn routes(&self) -> &RoutesInternalData<W> {
        &self.routes
    }
}

fn check_weights<W: Weight>(graph: &DirectedWeightedGraph<W>) -> Result<(), RouterError> {
    let zero = W::default();
    for (id, edge) in graph.edges().iter().enumerate() {
        match edge.weight.partial_cmp(&zero) {
            Some(Ordering::Equal | Ordering::Greater) => {}
            Some(Ordering::Less) | None => {
                return Err(RouterError::NegativeWeight {
                    edge: id,
                    weight: format!("{:?}", edge.weight),
                });
            }
        }
    }
    Ok(())
}

/// Seeds the table with zero-weight self routes and direct edges.
///
/// Among parallel edges the lightest wins; on a tie the earliest edge stays.
fn initialize<W: Weight>(graph: &DirectedWeightedGraph<W>, routes: &mut RoutesInternalData<W>) {
    for (vertex, incident) in graph.incidence_lists().iter().enumerate() {
        let idx = routes.index(vertex, vertex);
        routes.cells[idx] = Some(RouteInternalData {
            weight: W::default(),
            prev_edge: None,
        });

        for &edge_id in incident {
            let edge = &graph.edges()[edge_id];
            let idx = routes.index(vertex, edge.to);
            let keep = matches!(&routes.cells[idx], Some(current) if current.weight <= edge.weight);
            if !keep {
                routes.cells[idx] = Some(RouteInternalData {
                    weight: edge.weight,
                    prev_edge: Some(edge_id),
                });
            }
        }
    }
}

fn relax_through<W: Weight>(routes: &mut RoutesInternalData<W>, through: VertexId) {
    let vertex_count = routes.vertex_count;
    for from in 0..vertex_count {
        let Some(first) = routes.cells[routes.index(from, through)] else {
            continue;
        };
        for to in 0..vertex_count {
            if let Some(second) = routes.cells[routes.index(through, to)] {
                routes.relax(from, to, first, second);
            }
        }
    }
}
