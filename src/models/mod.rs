//! Core data models for proximity ranking.

pub mod point;
pub mod request;
pub mod resource;

pub use point::{haversine_km, round_km, GeoPoint, EARTH_RADIUS_KM};
pub use request::RankRequest;
pub use resource::{RankedResource, RankedResources, Resource, UNKNOWN_LOCATION};
