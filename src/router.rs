use crate::domain::{predict_price, summarize, PredictionInput, ValidationError};
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, script_response, ResultResp};
use crate::state::AppState;
use crate::templates;
use astra::Request;
use serde_json::Value;
use std::io::Read;
use tracing::info;

pub const DASHBOARD_SCRIPT_PATH: &str = "/static/dashboard.js";
const DASHBOARD_SCRIPT: &str = include_str!("../static/dashboard.js");

/// Prediction bodies are a handful of fields.
const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(templates::pages::dashboard_page(
            state.bundle.city_encoder.classes(),
            state.bundle.type_encoder.classes(),
        )),
        ("GET", DASHBOARD_SCRIPT_PATH) => script_response(DASHBOARD_SCRIPT),

        ("GET", "/api/analytics") => analytics(state),
        ("POST", "/api/predict") => predict(req, state),

        (_, "/" | "/api/analytics" | "/api/predict" | DASHBOARD_SCRIPT_PATH) => {
            Err(ServerError::MethodNotAllowed)
        }
        _ => Err(ServerError::NotFound),
    }
}

fn analytics(state: &AppState) -> ResultResp {
    let summary = summarize(&state.listings)?;
    json_response(&summary)
}

fn predict(req: Request, state: &AppState) -> ResultResp {
    let body = read_json_body(req)?;
    let input = PredictionInput::from_json(&body)?;
    let result = predict_price(&state.bundle, input)?;

    let i = &result.input_data;
    info!(
        "Prediction made: area={}, br={}, ba={}, city={}, type={} -> price=${}",
        i.area, i.bedrooms, i.bathrooms, i.city, i.property_type, result.predicted_price
    );

    json_response(&result)
}

fn read_json_body(req: Request) -> Result<Value, ServerError> {
    let mut bytes = Vec::new();
    req.into_body()
        .reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| ValidationError::Malformed(format!("could not read request body: {e}")))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        ValidationError::Malformed(format!("request body is not valid JSON: {e}")).into()
    })
}
