//! Model-serving contract around the ranker.
//!
//! Mirrors the usual inference container handler chain: load the model,
//! decode the request body, predict, encode the response. There is no model
//! artifact; the "model" is the rule-based [`ProximityRanker`].

mod error;

pub use error::{ErrorResponse, InferenceError};

use tracing::debug;

use crate::models::{RankRequest, RankedResources};
use crate::ranker::ProximityRanker;

/// The only content type the decoder accepts
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build the ranker. No artifact is read.
pub fn load_model(top_k: usize) -> ProximityRanker {
    ProximityRanker::new(top_k)
}

/// Check the declared content type and decode the body.
///
/// Media type parameters (`; charset=utf-8`) are ignored and the comparison
/// is case-insensitive. The content type is checked before the body is
/// looked at.
pub fn decode_request(
    content_type: Option<&str>,
    body: &[u8],
) -> Result<RankRequest, InferenceError> {
    let declared = content_type.unwrap_or_default();
    if !is_json(declared) {
        return Err(InferenceError::UnsupportedMediaType(declared.to_string()));
    }

    serde_json::from_slice(body).map_err(|e| InferenceError::MalformedRequest {
        message: e.to_string(),
        source: Some(e),
    })
}

/// Rank a decoded request
pub fn predict(ranker: &ProximityRanker, request: &RankRequest) -> RankedResources {
    ranker.rank(request.incident, &request.resources)
}

/// Serialize the ranked output as JSON
pub fn encode_response(ranked: &RankedResources) -> Result<Vec<u8>, InferenceError> {
    serde_json::to_vec(ranked).map_err(InferenceError::Encode)
}

/// Full decode -> predict -> encode pipeline
pub fn invoke(
    ranker: &ProximityRanker,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Vec<u8>, InferenceError> {
    let request = decode_request(content_type, body)?;

    debug!(
        "Ranking {} categories around ({}, {})",
        request.resources.len(),
        request.incident.lat,
        request.incident.lon
    );

    let ranked = predict(ranker, &request);
    encode_response(&ranked)
}

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media| media.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}
