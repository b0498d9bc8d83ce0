//! Catalogue data contract and an in-memory implementation.
//!
//! The builder only needs three things from a catalogue: the stop names,
//! road distances between stops, and the bus routes. `Catalogue` captures
//! that contract so the builder can be tested with hand-made data and fed
//! from any store.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::RoutingSettings;

/// A bus route as an ordered list of stop names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusRoute {
    /// Bus name, e.g. "297".
    pub name: String,

    /// Circular routes are ridden forward only. Other routes are ridden
    /// forward and then back through the same stops in reverse.
    pub is_circular: bool,

    /// Stops in travel order.
    pub stops: Vec<String>,
}

impl BusRoute {
    pub fn new(name: impl Into<String>, is_circular: bool, stops: &[&str]) -> Self {
        Self {
            name: name.into(),
            is_circular,
            stops: stops.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Read-only source of stops, distances and routes.
pub trait Catalogue {
    /// Stop names in a stable order.
    fn stops(&self) -> impl Iterator<Item = &str>;

    /// Road distance in meters from `from` to `to`.
    ///
    /// Distances aren't assumed symmetric: `distance(a, b)` may be known
    /// while `distance(b, a)` is not, or differ from it.
    fn distance(&self, from: &str, to: &str) -> Option<u32>;

    /// Bus routes in a stable order.
    fn buses(&self) -> impl Iterator<Item = &BusRoute>;
}

/// Catalogue file contents.
///
/// ```json
/// {
///   "routing_settings": {"bus_wait_time": 6, "bus_velocity": 40},
///   "base_requests": [
///     {"type": "Stop", "name": "A", "road_distances": {"B": 1000}},
///     {"type": "Stop", "name": "B"},
///     {"type": "Bus", "name": "14", "is_roundtrip": false, "stops": ["A", "B"]}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogueData {
    #[serde(default)]
    pub routing_settings: RoutingSettings,

    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
}

/// One entry of `base_requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        is_roundtrip: bool,
        stops: Vec<String>,
    },
}

impl CatalogueData {
    /// Parse a catalogue file.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build an in-memory catalogue from the requests.
    ///
    /// Stops are registered first in request order, then distances, then buses.
    pub fn to_catalogue(&self) -> InMemoryCatalogue {
        let mut catalogue = InMemoryCatalogue::new();

        for request in &self.base_requests {
            if let BaseRequest::Stop { name, .. } = request {
                catalogue.add_stop(name);
            }
        }

        for request in &self.base_requests {
            if let BaseRequest::Stop {
                name,
                road_distances,
            } = request
            {
                for (other, &meters) in road_distances {
                    catalogue.set_distance(name, other, meters);
                }
            }
        }

        for request in &self.base_requests {
            if let BaseRequest::Bus {
                name,
                is_roundtrip,
                stops,
            } = request
            {
                catalogue.add_bus(BusRoute {
                    name: name.clone(),
                    is_circular: *is_roundtrip,
                    stops: stops.clone(),
                });
            }
        }

        catalogue
    }
}

/// Catalogue held in memory.
///
/// Stops keep insertion order; buses are ordered by name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogue {
    stops: Vec<String>,
    known_stops: HashSet<String>,
    distances: HashMap<String, HashMap<String, u32>>,
    buses: BTreeMap<String, BusRoute>,
}

impl InMemoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop. Adding an existing stop is a no-op.
    pub fn add_stop(&mut self, name: &str) {
        if self.known_stops.insert(name.to_string()) {
            self.stops.push(name.to_string());
        }
    }

    /// Record the road distance from `from` to `to`, registering either stop
    /// if it's new. Only this direction is set.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) {
        self.add_stop(from);
        self.add_stop(to);
        self.distances
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), meters);
    }

    /// Add a bus route, replacing any route with the same name.
    pub fn add_bus(&mut self, route: BusRoute) {
        self.buses.insert(route.name.clone(), route);
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }
}

impl Catalogue for InMemoryCatalogue {
    fn stops(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(String::as_str)
    }

    fn distance(&self, from: &str, to: &str) -> Option<u32> {
        self.distances.get(from)?.get(to).copied()
    }

    fn buses(&self) -> impl Iterator<Item = &BusRoute> {
        self.buses.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_keep_insertion_order() {
        let mut catalogue = InMemoryCatalogue::new();
        catalogue.add_stop("Tolstopaltsevo");
        catalogue.add_stop("Marushkino");
        catalogue.add_stop("Tolstopaltsevo");

        let stops: Vec<&str> = catalogue.stops().collect();
        assert_eq!(stops, vec!["Tolstopaltsevo", "Marushkino"]);
        assert_eq!(catalogue.stop_count(), 2);
    }

    #[test]
    fn distances_are_directional() {
        let mut catalogue = InMemoryCatalogue::new();
        catalogue.set_distance("A", "B", 3900);
        catalogue.set_distance("B", "A", 4100);
        catalogue.set_distance("B", "C", 500);

        assert_eq!(catalogue.distance("A", "B"), Some(3900));
        assert_eq!(catalogue.distance("B", "A"), Some(4100));
        assert_eq!(catalogue.distance("B", "C"), Some(500));
        assert_eq!(catalogue.distance("C", "B"), None);
        assert_eq!(catalogue.distance("X", "A"), None);
    }

    #[test]
    fn set_distance_registers_stops() {
        let mut catalogue = InMemoryCatalogue::new();
        catalogue.set_distance("A", "B", 100);

        let stops: Vec<&str> = catalogue.stops().collect();
        assert_eq!(stops, vec!["A", "B"]);
    }

    #[test]
    fn buses_ordered_by_name() {
        let mut catalogue = InMemoryCatalogue::new();
        catalogue.add_bus(BusRoute::new("828", true, &["A", "B", "A"]));
        catalogue.add_bus(BusRoute::new("256", false, &["B", "C"]));
        catalogue.add_bus(BusRoute::new("750", false, &["A", "C"]));

        let names: Vec<&str> = catalogue.buses().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["256", "750", "828"]);
    }

    #[test]
    fn add_bus_replaces_same_name() {
        let mut catalogue = InMemoryCatalogue::new();
        catalogue.add_bus(BusRoute::new("14", false, &["A", "B"]));
        catalogue.add_bus(BusRoute::new("14", true, &["A", "B", "A"]));

        assert_eq!(catalogue.bus_count(), 1);
        assert!(catalogue.buses().next().unwrap().is_circular);
    }

    #[test]
    fn parse_catalogue_json() {
        let json = r#"{
            "routing_settings": {"bus_wait_time": 2, "bus_velocity": 30},
            "base_requests": [
                {"type": "Bus", "name": "297", "stops": ["Biryulyovo Zapadnoye", "Universam"], "is_roundtrip": false},
                {"type": "Stop", "name": "Biryulyovo Zapadnoye", "latitude": 55.574371, "longitude": 37.6517,
                 "road_distances": {"Universam": 2400}},
                {"type": "Stop", "name": "Universam", "latitude": 55.587655, "longitude": 37.645687}
            ]
        }"#;

        let data = CatalogueData::from_json(json).unwrap();
        assert_eq!(data.routing_settings, RoutingSettings::new(2.0, 30.0));
        assert_eq!(data.base_requests.len(), 3);

        let catalogue = data.to_catalogue();
        let stops: Vec<&str> = catalogue.stops().collect();
        assert_eq!(stops, vec!["Biryulyovo Zapadnoye", "Universam"]);
        assert_eq!(
            catalogue.distance("Biryulyovo Zapadnoye", "Universam"),
            Some(2400)
        );

        let bus = catalogue.buses().next().unwrap();
        assert_eq!(bus.name, "297");
        assert!(!bus.is_circular);
        assert_eq!(bus.stops, vec!["Biryulyovo Zapadnoye", "Universam"]);
    }

    #[test]
    fn parse_minimal_json() {
        let data = CatalogueData::from_json("{}").unwrap();

        assert_eq!(data.routing_settings, RoutingSettings::default());
        assert!(data.base_requests.is_empty());
        assert_eq!(data.to_catalogue().stop_count(), 0);
    }

    #[test]
    fn reject_unknown_request_type() {
        let json = r#"{"base_requests": [{"type": "Tram", "name": "T1"}]}"#;
        assert!(CatalogueData::from_json(json).is_err());
    }
}
