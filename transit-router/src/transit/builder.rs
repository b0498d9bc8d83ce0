//! Route graph construction.
//!
//! Every stop gets a wait edge between its two vertices. Every bus route is
//! walked once (circular) or forward and then backward (there-and-back), and
//! each boarding stop gets a ride edge to every later stop on the same walk.
//! A "board here, ride N stops" option is therefore a single edge, and the
//! router needs no route-specific logic.

use tracing::{debug, trace};

use super::{BuildError, BusId, Catalogue, EdgeKind, RouteLayout, RoutingSettings, StopId};
use crate::graph::{DirectedWeightedGraph, Edge};

/// A finished route graph: the weighted graph plus its transit layout.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    pub graph: DirectedWeightedGraph<f64>,
    pub layout: RouteLayout,
}

/// Builds the time-weighted route graph for `catalogue`.
///
/// Edge weights are minutes: the wait edge of every stop weighs
/// `settings.bus_wait_time`, and a ride edge weighs the accumulated road
/// distance of its hops divided by the bus velocity.
///
/// # Errors
///
/// - `Settings` if `settings` are out of range
/// - `UnknownStop` if a route names a stop not listed by the catalogue
/// - `MissingDistance` if two adjacent stops have no distance in either direction
pub fn build_route_graph<C: Catalogue>(
    catalogue: &C,
    settings: RoutingSettings,
) -> Result<RouteGraph, BuildError> {
    settings.validate()?;

    let mut layout = RouteLayout::new(settings);
    for name in catalogue.stops() {
        layout.register_stop(name);
    }

    let stop_count = layout.stops().len();
    let mut graph = DirectedWeightedGraph::new(stop_count * 2);

    for idx in 0..stop_count {
        let stop = StopId(idx);
        graph.add_edge(Edge::new(
            RouteLayout::wait_vertex(stop),
            RouteLayout::ride_vertex(stop),
            settings.wait_time(),
        ))?;
        layout.push_edge_kind(EdgeKind::Wait { stop });
    }

    let mut builder = RideEdges {
        catalogue,
        settings: &settings,
        graph: &mut graph,
        layout: &mut layout,
    };
    for route in catalogue.buses() {
        let bus = builder.layout.register_bus(&route.name);
        let stops = route
            .stops
            .iter()
            .map(|name| {
                builder
                    .layout
                    .stop_id(name)
                    .ok_or_else(|| BuildError::UnknownStop {
                        bus: route.name.clone(),
                        stop: name.clone(),
                    })
            })
            .collect::<Result<Vec<StopId>, _>>()?;

        builder.add_walk(bus, &stops)?;
        if !route.is_circular {
            let reversed: Vec<StopId> = stops.iter().rev().copied().collect();
            builder.add_walk(bus, &reversed)?;
        }

        trace!(
            bus = %route.name,
            stops = stops.len(),
            circular = route.is_circular,
            "Added ride edges"
        );
    }

    debug!(
        stops = stop_count,
        buses = layout.buses().len(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "Route graph built"
    );

    Ok(RouteGraph { graph, layout })
}

/// Borrowed state for adding ride edges one walk at a time.
struct RideEdges<'a, C> {
    catalogue: &'a C,
    settings: &'a RoutingSettings,
    graph: &'a mut DirectedWeightedGraph<f64>,
    layout: &'a mut RouteLayout,
}

impl<C: Catalogue> RideEdges<'_, C> {
    /// Adds a ride edge from every stop on the walk to every later stop.
    fn add_walk(&mut self, bus: BusId, stops: &[StopId]) -> Result<(), BuildError> {
        let hops = stops
            .windows(2)
            .map(|pair| self.road_distance(pair[0], pair[1]))
            .collect::<Result<Vec<u32>, _>>()?;

        for (board, &from) in stops.iter().enumerate() {
            let mut meters: u64 = 0;
            for (alight, &to) in stops.iter().enumerate().skip(board + 1) {
                meters += u64::from(hops[alight - 1]);
                self.graph.add_edge(Edge::new(
                    RouteLayout::ride_vertex(from),
                    RouteLayout::wait_vertex(to),
                    self.settings.ride_time(meters),
                ))?;
                self.layout.push_edge_kind(EdgeKind::Ride {
                    bus,
                    span_count: alight - board,
                });
            }
        }

        Ok(())
    }

    /// Distance from `from` to `to`, falling back to the opposite direction.
    ///
    /// A stop repeated back-to-back is zero meters from itself unless the
    /// catalogue says otherwise.
    fn road_distance(&self, from: StopId, to: StopId) -> Result<u32, BuildError> {
        let from_name = self.stop_name(from);
        let to_name = self.stop_name(to);

        self.catalogue
            .distance(from_name, to_name)
            .or_else(|| self.catalogue.distance(to_name, from_name))
            .or((from == to).then_some(0))
            .ok_or_else(|| BuildError::MissingDistance {
                from: from_name.to_string(),
                to: to_name.to_string(),
            })
    }

    fn stop_name(&self, stop: StopId) -> &str {
        // Ids only come from the layout's own table
        self.layout.stop_name(stop).unwrap_or_default()
    }
}
