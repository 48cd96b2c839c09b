//! Request payload accepted by the ranker.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::BTreeMap;

use super::GeoPoint;

/// Decoded ranking request.
///
/// Resource records are kept as raw JSON text; each one is decoded and
/// validated individually by [`Resource::parse`](super::Resource::parse) so a
/// bad record only drops itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    /// Incident location, `{"lat": .., "lon": ..}`
    pub incident: GeoPoint,

    /// Category name -> candidate resource records
    pub resources: BTreeMap<String, Vec<Box<RawValue>>>,
}
