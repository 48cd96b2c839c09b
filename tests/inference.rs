use beacon::inference::{self, InferenceError, JSON_CONTENT_TYPE};
use beacon::models::{RankedResources, UNKNOWN_LOCATION};
use serde_json::{json, Value};

fn invoke_json(payload: &Value) -> Result<Value, InferenceError> {
    let ranker = inference::load_model(3);
    let body = serde_json::to_vec(payload).unwrap();
    let encoded = inference::invoke(&ranker, Some(JSON_CONTENT_TYPE), &body)?;
    Ok(serde_json::from_slice(&encoded).unwrap())
}

#[test]
fn test_ambulance_example() {
    let payload = json!({
        "incident": { "lat": 40.0, "lon": -75.0 },
        "resources": {
            "ambulance": [
                { "resource_id": "R1", "latitude": 40.01, "longitude": -75.01 },
                { "resource_id": "R2", "longitude": -76.0 }
            ]
        }
    });

    let output = invoke_json(&payload).unwrap();
    let ambulance = output["ambulance"].as_array().unwrap();

    assert_eq!(ambulance.len(), 1);
    assert_eq!(ambulance[0]["resource_id"], "R1");
    assert_eq!(ambulance[0]["location"], UNKNOWN_LOCATION);
    let distance = ambulance[0]["distance_km"].as_f64().unwrap();
    assert!(distance > 1.3 && distance < 1.5, "got {}", distance);
}

#[test]
fn test_multiple_categories() {
    let payload = json!({
        "incident": { "lat": 19.0760, "lon": 72.8777 },
        "resources": {
            "hospitals": [
                { "resource_id": "H1", "latitude": "19.10", "longitude": "72.88", "location": "Andheri" },
                { "resource_id": "H2", "latitude": 19.20, "longitude": 72.90, "location": "Borivali" },
                { "resource_id": "H3", "latitude": 19.08, "longitude": 72.88, "location": "Bandra" },
                { "resource_id": "H4", "latitude": 28.70, "longitude": 77.10, "location": "Delhi" },
                { "resource_id": "H5", "latitude": "n/a", "longitude": 72.88 }
            ],
            "shelters": [],
            "food": [
                { "resource_id": "F1", "latitude": 19.0, "longitude": 72.8 }
            ]
        }
    });

    let output = invoke_json(&payload).unwrap();
    let ranked: RankedResources = serde_json::from_value(output).unwrap();

    let hospital_ids: Vec<&str> = ranked
        .get("hospitals")
        .unwrap()
        .iter()
        .filter_map(|r| r.resource_id.as_str())
        .collect();
    assert_eq!(hospital_ids, vec!["H3", "H1", "H2"]);

    let distances: Vec<f64> = ranked
        .get("hospitals")
        .unwrap()
        .iter()
        .map(|r| r.distance_km)
        .collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));

    assert!(ranked.get("shelters").unwrap().is_empty());
    assert_eq!(ranked.nearest("food").unwrap().location, UNKNOWN_LOCATION);
    assert_eq!(ranked.nearest("hospitals").unwrap().location, "Bandra");
}

#[test]
fn test_bad_literal_only_drops_its_resource() {
    let ranker = inference::load_model(3);
    let body = br#"{
        "incident": {"lat": 40.0, "lon": -75.0},
        "resources": {"ambulance": [
            {"resource_id": "BAD", "latitude": 1e400, "longitude": -75.0},
            {"resource_id": "R1", "latitude": 40.01, "longitude": -75.01}
        ]}
    }"#;

    let encoded = inference::invoke(&ranker, Some(JSON_CONTENT_TYPE), body).unwrap();
    let output: Value = serde_json::from_slice(&encoded).unwrap();
    assert_eq!(
        output,
        json!({
            "ambulance": [{ "resource_id": "R1", "location": UNKNOWN_LOCATION, "distance_km": 1.4 }]
        })
    );
}

#[test]
fn test_resource_fields_emitted_as_given() {
    let payload = json!({
        "incident": { "lat": 40.0, "lon": -75.0 },
        "resources": {
            "ambulance": [
                { "resource_id": "R1", "latitude": 41.0, "longitude": -76.0, "location": null },
                { "resource_id": 12, "latitude": 40.01, "longitude": -75.01 }
            ]
        }
    });

    let output = invoke_json(&payload).unwrap();
    assert_eq!(
        output,
        json!({
            "ambulance": [
                { "resource_id": 12, "location": UNKNOWN_LOCATION, "distance_km": 1.4 },
                { "resource_id": "R1", "location": null, "distance_km": 139.69 }
            ]
        })
    );
}

#[test]
fn test_unsupported_content_type() {
    let ranker = inference::load_model(3);
    let body = br#"{"incident": {"lat": 0, "lon": 0}, "resources": {}}"#;

    let err = inference::invoke(&ranker, Some("text/plain"), body).unwrap_err();
    assert!(matches!(err, InferenceError::UnsupportedMediaType(_)));
}

#[test]
fn test_missing_incident_is_malformed() {
    let err = invoke_json(&json!({ "resources": { "ambulance": [] } })).unwrap_err();
    assert!(matches!(err, InferenceError::MalformedRequest { .. }));

    let err = invoke_json(&json!({ "incident": { "lat": 1.0, "lon": 1.0 } })).unwrap_err();
    assert!(matches!(err, InferenceError::MalformedRequest { .. }));
}

#[test]
fn test_empty_resources_map() {
    let output = invoke_json(&json!({
        "incident": { "lat": 1.0, "lon": 1.0 },
        "resources": {}
    }))
    .unwrap();

    assert_eq!(output, json!({}));
}
