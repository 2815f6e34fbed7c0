//! Dealer Locator - nearest-dealer lookup service for Swiss postal codes
//!
//! Given a 4-digit zip code, this library geocodes it via a Nominatim-style
//! service, computes great-circle distance to every registered dealer, and
//! returns the nearest one or two. Dealer registry and search history are
//! in-memory, process-lifetime state; geocoding results are cached with a
//! bounded TTL.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, rank_nearest, FindResult, Finder, ResolveLocation, ResolvedDealer};
pub use crate::models::{Dealer, FindNearestRequest, FindNearestResponse, GeoPoint, NearestDealer, SearchRecord};
