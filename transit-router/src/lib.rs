//! Transit routing engine.
//!
//! Answers "what is the fastest way from stop A to stop B" over a bus
//! network. A catalogue of stops, routes and road distances is compiled
//! once into a time-weighted graph with an all-pairs routes table; queries
//! are then table lookups plus a short predecessor walk.

pub mod graph;
pub mod router;
pub mod snapshot;
pub mod transit;
