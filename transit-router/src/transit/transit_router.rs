//! Stop-to-stop routing facade.

use std::time::Instant;

use tracing::{info, trace};

use super::{
    BuildError, Catalogue, Itinerary, LayoutError, QueryError, RouteLayout, RoutingSettings,
    build_itinerary, build_route_graph,
};
use crate::router::Router;

/// Answers "fastest way from stop A to stop B".
///
/// Built once per catalogue and immutable afterwards. Queries take `&self`,
/// so one instance can be shared across threads (e.g. in an `Arc`).
#[derive(Debug, Clone)]
pub struct TransitRouter {
    layout: RouteLayout,
    router: Router<f64>,
}

impl TransitRouter {
    /// Builds the route graph and the full routes table for `catalogue`.
    ///
    /// Fails as a whole: no partially built router is ever returned.
    pub fn build<C: Catalogue>(
        catalogue: &C,
        settings: RoutingSettings,
    ) -> Result<Self, BuildError> {
        let started = Instant::now();

        let route_graph = build_route_graph(catalogue, settings)?;
        let router = Router::new(route_graph.graph)?;

        info!(
            stops = route_graph.layout.stops().len(),
            buses = route_graph.layout.buses().len(),
            vertices = router.graph().vertex_count(),
            edges = router.graph().edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Transit router ready"
        );

        Ok(Self {
            layout: route_graph.layout,
            router,
        })
    }

    /// Pairs a layout with a router built over the matching graph.
    pub fn from_parts(layout: RouteLayout, router: Router<f64>) -> Result<Self, LayoutError> {
        layout.check(router.graph())?;
        Ok(Self { layout, router })
    }

    /// Fastest itinerary from stop `from` to stop `to`.
    ///
    /// Returns `Ok(None)` when both stops exist but no route connects them.
    ///
    /// # Errors
    ///
    /// `UnknownStop` if either name isn't a stop in the catalogue.
    pub fn route(&self, from: &str, to: &str) -> Result<Option<Itinerary>, QueryError> {
        let from_vertex = self
            .layout
            .stop_vertex(from)
            .ok_or_else(|| QueryError::UnknownStop(from.to_string()))?;
        let to_vertex = self
            .layout
            .stop_vertex(to)
            .ok_or_else(|| QueryError::UnknownStop(to.to_string()))?;

        let Some(route) = self.router.build_route(from_vertex, to_vertex)? else {
            trace!(from, to, "No route between stops");
            return Ok(None);
        };

        let itinerary = build_itinerary(self.router.graph(), &self.layout, &route)?;
        trace!(
            from,
            to,
            total_time = itinerary.total_time,
            rides = itinerary.ride_count(),
            "Route found"
        );
        Ok(Some(itinerary))
    }

    pub fn layout(&self) -> &RouteLayout {
        &self.layout
    }

    pub fn router(&self) -> &Router<f64> {
        &self.router
    }

    pub fn settings(&self) -> &RoutingSettings {
        self.layout.settings()
    }
}
