use crate::dataset::synth::{synthesize, SynthConfig};
use crate::ml::{self, ForestConfig, TrainConfig};
use crate::router::DASHBOARD_SCRIPT_PATH;
use crate::state::AppState;
use crate::tests::utils::{init_test_state, request, send, send_json, three_listings};
use astra::Body;
use http::Method;
use serde_json::json;

#[test]
fn dashboard_page_loads() {
    let state = init_test_state(three_listings());

    let (status, body) = send(&state, request(Method::GET, "/", Body::empty()));

    assert_eq!(status, 200);
    assert!(body.contains("predictionForm"));
    assert!(body.contains(DASHBOARD_SCRIPT_PATH));
}

#[test]
fn dashboard_form_offers_the_model_labels() {
    let rows = synthesize(&SynthConfig {
        record_count: 40,
        city_base_prices: vec![("Boise".to_string(), 200_000), ("Tulsa".to_string(), 180_000)],
        property_types: vec!["Cabin".to_string(), "Loft".to_string()],
        ..Default::default()
    })
    .unwrap();
    let bundle = ml::train(
        &rows,
        &TrainConfig {
            forest: ForestConfig {
                n_estimators: 5,
                ..Default::default()
            },
            ..Default::default()
        },
    )
    .unwrap();
    let state = AppState::new(rows, bundle);

    let (status, body) = send(&state, request(Method::GET, "/", Body::empty()));

    assert_eq!(status, 200);
    for label in ["Boise", "Tulsa", "Cabin", "Loft"] {
        assert!(body.contains(&format!(r#"<option value="{label}">"#)), "missing {label}");
    }
    assert!(!body.contains("New York"));
    assert!(!body.contains("Apartment"));
}

#[test]
fn dashboard_script_is_served() {
    let state = init_test_state(three_listings());

    let (status, body) = send(&state, request(Method::GET, DASHBOARD_SCRIPT_PATH, Body::empty()));

    assert_eq!(status, 200);
    assert!(body.contains("/api/analytics"));
}

#[test]
fn unknown_route_is_a_json_404() {
    let state = init_test_state(three_listings());

    let (status, body) = send_json(&state, request(Method::GET, "/api/nope", Body::empty()));

    assert_eq!(status, 404);
    assert_eq!(body, json!({"error": "Route not found"}));
}

#[test]
fn wrong_method_on_known_route_is_405() {
    let state = init_test_state(three_listings());

    let (status, body) = send_json(&state, request(Method::GET, "/api/predict", Body::empty()));

    assert_eq!(status, 405);
    assert_eq!(body, json!({"error": "Method not allowed"}));
}
