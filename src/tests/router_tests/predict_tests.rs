use crate::tests::utils::{init_test_state, post_json, request, send_json, three_listings};
use astra::Body;
use http::Method;
use serde_json::{json, Value};

fn valid_body() -> Value {
    json!({
        "area": 2000,
        "bedrooms": 3,
        "bathrooms": 2,
        "city": "Chicago",
        "property_type": "House"
    })
}

#[test]
fn prediction_returns_price_and_echoes_input() {
    let state = init_test_state(three_listings());

    let (status, body) = send_json(&state, post_json("/api/predict", &valid_body()));

    assert_eq!(status, 200);
    let price = body["predicted_price"].as_f64().unwrap();
    assert!(price > 0.0);
    assert_eq!(price, (price * 100.0).round() / 100.0);
    assert_eq!(
        body["input_data"],
        json!({
            "area": 2000.0,
            "bedrooms": 3,
            "bathrooms": 2,
            "city": "Chicago",
            "property_type": "House"
        })
    );
}

#[test]
fn identical_requests_get_identical_predictions() {
    let state = init_test_state(three_listings());

    let (_, first) = send_json(&state, post_json("/api/predict", &valid_body()));
    let (_, second) = send_json(&state, post_json("/api/predict", &valid_body()));

    assert_eq!(first, second);
}

#[test]
fn larger_homes_in_pricier_cities_cost_more() {
    let state = init_test_state(three_listings());

    let mut small = valid_body();
    small["area"] = json!(700);
    small["bedrooms"] = json!(1);
    small["bathrooms"] = json!(1);
    small["city"] = json!("Houston");
    let mut large = valid_body();
    large["area"] = json!(4800);
    large["bedrooms"] = json!(5);
    large["bathrooms"] = json!(3);
    large["city"] = json!("New York");

    let (_, small) = send_json(&state, post_json("/api/predict", &small));
    let (_, large) = send_json(&state, post_json("/api/predict", &large));

    assert!(large["predicted_price"].as_f64() > small["predicted_price"].as_f64());
}

#[test]
fn zero_area_is_rejected_like_a_missing_field() {
    let state = init_test_state(three_listings());
    let mut body = valid_body();
    body["area"] = json!(0);

    let (status, resp) = send_json(&state, post_json("/api/predict", &body));

    assert_eq!(status, 400);
    assert_eq!(resp, json!({"error": "Missing required fields"}));
}

#[test]
fn zero_area_wins_over_an_unknown_city() {
    let state = init_test_state(three_listings());
    let mut body = valid_body();
    body["area"] = json!(0);
    body["city"] = json!("Atlantis");

    let (status, _) = send_json(&state, post_json("/api/predict", &body));

    assert_eq!(status, 400);
}

#[test]
fn missing_field_is_rejected() {
    let state = init_test_state(three_listings());
    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("property_type");

    let (status, resp) = send_json(&state, post_json("/api/predict", &body));

    assert_eq!(status, 400);
    assert_eq!(resp["error"], "Missing required fields");
}

#[test]
fn unseen_city_is_an_error_not_a_default() {
    let state = init_test_state(three_listings());
    let mut body = valid_body();
    body["city"] = json!("Atlantis");

    let (status, resp) = send_json(&state, post_json("/api/predict", &body));

    assert_eq!(status, 400);
    assert_eq!(resp["error"], "Invalid input: unknown city 'Atlantis'");
    assert!(resp.get("predicted_price").is_none());
}

#[test]
fn unseen_property_type_is_rejected() {
    let state = init_test_state(three_listings());
    let mut body = valid_body();
    body["property_type"] = json!("Castle");

    let (status, resp) = send_json(&state, post_json("/api/predict", &body));

    assert_eq!(status, 400);
    assert_eq!(resp["error"], "Invalid input: unknown property_type 'Castle'");
}

#[test]
fn non_json_body_is_a_client_error() {
    let state = init_test_state(three_listings());

    let (status, resp) = send_json(
        &state,
        request(Method::POST, "/api/predict", Body::from("area=1500")),
    );

    assert_eq!(status, 400);
    assert!(resp["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid input: request body is not valid JSON"));
}
