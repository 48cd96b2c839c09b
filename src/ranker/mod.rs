//! Proximity ranking of resources around an incident.
//!
//! Each category is ranked independently: records are validated, measured
//! against the incident with the haversine formula, and the nearest few are
//! kept in ascending distance order.

mod service;

pub use service::{ProximityRanker, DEFAULT_TOP_K};

use std::collections::BTreeMap;

use serde_json::value::RawValue;

use crate::models::{GeoPoint, RankedResources};

/// Rank every category with the default ranker (nearest 3 per category).
pub fn rank(
    incident: GeoPoint,
    resources: &BTreeMap<String, Vec<Box<RawValue>>>,
) -> RankedResources {
    ProximityRanker::default().rank(incident, resources)
}
