//! itinerary-planner core
//!
//! Orders geolocated field stops into an itinerary, optionally delegating to
//! a remote optimizer, and keeps estimates consistent under manual reordering.

pub mod assignment;
pub mod catalog;
pub mod config;
pub mod error;
pub mod haversine;
pub mod heuristic;
pub mod itinerary;
pub mod map_link;
pub mod metrics;
pub mod model;
pub mod optimizer;
pub mod service;
pub mod session;
pub mod traits;
