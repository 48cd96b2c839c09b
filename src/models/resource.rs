//! Resource records: the loosely-typed input shape, the validated form,
//! and the ranked output entry.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::GeoPoint;

/// Location label used when a resource does not carry one.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// A resource whose coordinates have been validated.
///
/// `resource_id` and `location` are carried through exactly as the caller
/// sent them.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub resource_id: Value,
    pub location: Value,
    pub point: GeoPoint,
}

impl Resource {
    /// Decode and validate one raw resource record.
    ///
    /// The record is decoded on its own, so a bad literal inside it (for
    /// example a number out of `f64` range) only drops this record.
    pub fn parse(raw: &RawValue) -> Option<Self> {
        let obj: Map<String, Value> = serde_json::from_str(raw.get()).ok()?;
        Self::from_object(&obj)
    }

    /// Validate an already decoded record.
    ///
    /// Returns `None` for anything that cannot be ranked: non-object records,
    /// a missing `resource_id`, or a `latitude`/`longitude` that is missing or
    /// not interpretable as a finite float.
    pub fn from_value(raw: &Value) -> Option<Self> {
        Self::from_object(raw.as_object()?)
    }

    fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        let resource_id = obj.get("resource_id")?.clone();
        let lat = parse_coordinate(obj.get("latitude")?)?;
        let lon = parse_coordinate(obj.get("longitude")?)?;

        // Only an absent key gets the default; an explicit null is kept
        let location = obj
            .get("location")
            .cloned()
            .unwrap_or_else(|| Value::from(UNKNOWN_LOCATION));

        Some(Self {
            resource_id,
            location,
            point: GeoPoint::new(lat, lon),
        })
    }
}

/// Interpret a coordinate field as a float.
///
/// JSON numbers and numeric strings (surrounding whitespace allowed) are
/// accepted. Booleans, nulls, arrays, objects and non-finite values are not.
pub fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    parsed.is_finite().then_some(parsed)
}

/// One entry of a category's ranked output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResource {
    pub resource_id: Value,
    pub location: Value,
    /// Distance to the incident, rounded to two decimals
    pub distance_km: f64,
}

/// Ranked output for every requested category.
///
/// Serializes as a plain `{category: [entries]}` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedResources(pub BTreeMap<String, Vec<RankedResource>>);

impl RankedResources {
    /// Ranked entries for a category, if the category was requested
    pub fn get(&self, category: &str) -> Option<&[RankedResource]> {
        self.0.get(category).map(Vec::as_slice)
    }

    /// The single nearest resource in a category
    pub fn nearest(&self, category: &str) -> Option<&RankedResource> {
        self.get(category)?.first()
    }

    pub fn insert(&mut self, category: String, ranked: Vec<RankedResource>) {
        self.0.insert(category, ranked);
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
