//! Ranker service holding the per-category result limit.

use std::collections::BTreeMap;

use serde_json::value::RawValue;
use tracing::{debug, trace};

use crate::models::{round_km, GeoPoint, RankedResource, RankedResources, Resource};

/// Number of resources kept per category unless configured otherwise
pub const DEFAULT_TOP_K: usize = 3;

/// Stateless nearest-resource ranker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProximityRanker {
    top_k: usize,
}

impl Default for ProximityRanker {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl ProximityRanker {
    /// Create a ranker keeping at most `top_k` resources per category
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank all categories against the incident.
    ///
    /// Every input category appears in the output, with an empty list when
    /// none of its records were usable.
    pub fn rank(
        &self,
        incident: GeoPoint,
        resources: &BTreeMap<String, Vec<Box<RawValue>>>,
    ) -> RankedResources {
        let mut ranked = RankedResources::default();

        for (category, records) in resources {
            let nearest = self.rank_category(incident, records);

            debug!(
                "Ranked category '{}': {} candidates, kept {}",
                category,
                records.len(),
                nearest.len()
            );

            ranked.insert(category.clone(), nearest);
        }

        ranked
    }

    /// Rank a single category's records.
    ///
    /// Ties on the rounded distance keep their input order.
    pub fn rank_category(
        &self,
        incident: GeoPoint,
        records: &[Box<RawValue>],
    ) -> Vec<RankedResource> {
        let mut measured: Vec<RankedResource> = records
            .iter()
            .filter_map(|raw| {
                let measured = Resource::parse(raw).and_then(|r| measure(incident, r));
                if measured.is_none() {
                    trace!("Skipping unusable resource record: {}", raw.get());
                }
                measured
            })
            .collect();

        // Stable sort; distances are finite at this point
        measured.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        measured.truncate(self.top_k);
        measured
    }
}

/// Distance from the incident to a validated resource.
///
/// Returns `None` when the distance is not finite, which only happens for
/// coordinates far outside the valid ranges.
fn measure(incident: GeoPoint, resource: Resource) -> Option<RankedResource> {
    let distance = incident.distance_km(&resource.point);
    if !distance.is_finite() {
        return None;
    }

    Some(RankedResource {
        resource_id: resource.resource_id,
        location: resource.location,
        distance_km: round_km(distance),
    })
}
