//! Rider-facing itineraries.
//!
//! A router path is a list of edge ids; an itinerary says what to do along
//! it. Each wait edge becomes a `Wait` step at its stop and each ride edge a
//! `Ride` step on its bus, in path order.

use serde::Serialize;

use super::{EdgeKind, QueryError, RouteLayout};
use crate::graph::DirectedWeightedGraph;
use crate::router::RouteInfo;

/// One step of an itinerary.
///
/// Serializes as `{"type": "Wait", "stop_name", "time"}` or
/// `{"type": "Bus", "bus", "span_count", "time"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ItineraryItem {
    /// Wait at a stop for the next bus
    Wait { stop_name: String, time: f64 },

    /// Ride a bus for `span_count` stops
    #[serde(rename = "Bus")]
    Ride {
        #[serde(rename = "bus")]
        bus_name: String,
        span_count: usize,
        time: f64,
    },
}

impl ItineraryItem {
    /// Duration of this step in minutes.
    pub fn time(&self) -> f64 {
        match self {
            ItineraryItem::Wait { time, .. } | ItineraryItem::Ride { time, .. } => *time,
        }
    }

    pub fn is_wait(&self) -> bool {
        matches!(self, ItineraryItem::Wait { .. })
    }

    pub fn is_ride(&self) -> bool {
        matches!(self, ItineraryItem::Ride { .. })
    }
}

/// The fastest way between two stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    /// Total travel time in minutes, waits included.
    pub total_time: f64,

    /// Steps in travel order.
    pub items: Vec<ItineraryItem>,
}

impl Itinerary {
    /// Number of buses boarded.
    pub fn ride_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_ride()).count()
    }
}

/// Turns a router path over a route graph into an itinerary.
///
/// Ride steps take the ride edge's weight as their time; the boarding wait
/// is its own `Wait` step.
pub fn build_itinerary(
    graph: &DirectedWeightedGraph<f64>,
    layout: &RouteLayout,
    route: &RouteInfo<f64>,
) -> Result<Itinerary, QueryError> {
    let items = route
        .edges
        .iter()
        .map(|&edge_id| {
            let edge = graph.edge(edge_id).map_err(|e| QueryError::Router(e.into()))?;
            let item = match layout.edge_kind(edge_id) {
                Some(EdgeKind::Wait { stop }) => ItineraryItem::Wait {
                    stop_name: layout.stop_name(stop).unwrap_or_default().to_string(),
                    time: edge.weight,
                },
                Some(EdgeKind::Ride { bus, span_count }) => ItineraryItem::Ride {
                    bus_name: layout.bus_name(bus).unwrap_or_default().to_string(),
                    span_count,
                    time: edge.weight,
                },
                None => return Err(QueryError::UntaggedEdge(edge_id)),
            };
            Ok(item)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug_assert!(items.first().is_none_or(ItineraryItem::is_wait));

    Ok(Itinerary {
        total_time: route.weight,
        items,
    })
}
