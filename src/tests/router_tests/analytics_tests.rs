use crate::tests::utils::{init_test_state, listing, request, send_json, three_listings};
use astra::Body;
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn analytics_over_three_listings() {
    let state = init_test_state(three_listings());

    let (status, body) = send_json(&state, request(Method::GET, "/api/analytics", Body::empty()));

    assert_eq!(status, 200);
    assert_eq!(body["total_listings"], 3);
    assert!((body["avg_price"].as_f64().unwrap() - 316666.67).abs() < 0.01);
    assert_eq!(body["min_price"], 250000.0);
    assert_eq!(body["max_price"], 400000.0);

    let cities = body["city_data"].as_array().unwrap();
    assert!(cities.contains(&json!({"city": "Chicago", "avg_price": 350000.0, "count": 2})));
    assert!(cities.contains(&json!({"city": "Houston", "avg_price": 250000.0, "count": 1})));
    assert_eq!(cities.len(), 2);

    assert_eq!(
        body["price_trends"],
        json!([
            {"area": 1000, "price": 300000.0},
            {"area": 1500, "price": 250000.0},
            {"area": 2000, "price": 400000.0},
        ])
    );
}

#[test]
fn price_trends_cover_every_listing_in_area_order() {
    let rows: Vec<_> = (0..30)
        .map(|i| listing(4000 - (i * 97) % 3500, 2, 1, "Phoenix", 200000.0 + i as f64))
        .collect();
    let state = init_test_state(rows);

    let (status, body) = send_json(&state, request(Method::GET, "/api/analytics", Body::empty()));

    assert_eq!(status, 200);
    let trends = body["price_trends"].as_array().unwrap();
    assert_eq!(trends.len() as u64, body["total_listings"].as_u64().unwrap());
    let areas: Vec<i64> = trends.iter().map(|t| t["area"].as_i64().unwrap()).collect();
    assert!(areas.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn empty_dataset_reports_a_server_error() {
    let state = init_test_state(Vec::new());

    let (status, body) = send_json(&state, request(Method::GET, "/api/analytics", Body::empty()));

    assert_eq!(status, 500);
    assert!(body["error"].as_str().unwrap().contains("empty dataset"));
}
