//! Beacon - nearest-resource ranking for incident response
//!
//! This library provides the proximity ranker, its data models, and the
//! inference contract used by the `serve` binary.

pub mod config;
pub mod inference;
pub mod models;
pub mod ranker;

pub use models::{GeoPoint, RankRequest, RankedResource, RankedResources, Resource};
pub use ranker::{rank, ProximityRanker};
