//! Transit-specific layer over the generic graph and router.
//!
//! Turns a catalogue of stops, bus routes and road distances into a
//! time-weighted graph, and turns router output back into rider-facing
//! itineraries. Every stop owns two vertices: one for waiting at the stop
//! and one for being ready to ride from it. The fixed boarding wait is the
//! edge between them.

mod builder;
mod catalogue;
mod config;
mod error;
mod itinerary;
mod layout;
mod names;
mod transit_router;


pub use builder::{RouteGraph, build_route_graph};
pub use catalogue::{BaseRequest, BusRoute, Catalogue, CatalogueData, InMemoryCatalogue};
pub use config::{RoutingSettings, SettingsError};
pub use error::{BuildError, LayoutError, QueryError};
pub use itinerary::{Itinerary, ItineraryItem, build_itinerary};
pub use layout::{EdgeKind, RouteLayout, VertexRole};
pub use names::{BusId, NameTable, StopId};
pub use transit_router::TransitRouter;
