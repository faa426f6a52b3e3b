use crate::dataset::synth::{synthesize, SynthConfig};
use crate::domain::Listing;
use crate::ml::{self, ForestConfig, ModelBundle, TrainConfig};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use astra::{Body, Request};
use http::Method;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn listing(area: i64, bedrooms: i64, bathrooms: i64, city: &str, price: f64) -> Listing {
    Listing {
        area,
        bedrooms,
        bathrooms,
        city: city.to_string(),
        property_type: "House".to_string(),
        price,
    }
}

/// The three-row table used by the end-to-end analytics checks.
pub fn three_listings() -> Vec<Listing> {
    vec![
        listing(1000, 2, 1, "Chicago", 300000.0),
        listing(2000, 3, 2, "Chicago", 400000.0),
        listing(1500, 2, 1, "Houston", 250000.0),
    ]
}

/// A small forest fitted on the default synthetic table.
pub fn test_bundle() -> ModelBundle {
    let rows = synthesize(&SynthConfig::default()).expect("synthesis failed");
    let cfg = TrainConfig {
        forest: ForestConfig {
            n_estimators: 10,
            ..Default::default()
        },
        ..Default::default()
    };
    ml::train(&rows, &cfg).expect("training failed")
}

pub fn init_test_state(listings: Vec<Listing>) -> AppState {
    AppState::new(listings, test_bundle())
}

pub fn temp_path(name: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{name}_{}.{ext}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

pub fn request(method: Method, uri: &str, body: Body) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request {
    request(Method::POST, uri, Body::from(body.to_string()))
}

/// Runs a request the way the server closure does, errors included.
pub fn send(state: &AppState, req: Request) -> (u16, String) {
    let resp = match handle(req, state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    };
    let status = resp.status().as_u16();

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    (status, body)
}

pub fn send_json(state: &AppState, req: Request) -> (u16, Value) {
    let (status, body) = send(state, req);
    let json = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("response was not JSON ({e}): {body}"));
    (status, json)
}
