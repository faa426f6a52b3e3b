use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::{error, warn};

/// Convert a ServerError into a JSON `{ "error": message }` response
pub fn error_to_response(err: ServerError) -> Response {
    let status = match &err {
        ServerError::NotFound => 404,
        ServerError::MethodNotAllowed => 405,
        ServerError::BadRequest(_) => 400,
        ServerError::Computation(_) | ServerError::InternalError => 500,
    };

    match status {
        500 => error!("Request failed: {err}"),
        400 => warn!("Validation error: {err}"),
        _ => {}
    }

    json_error_response(status, &err.to_string())
}

/// Build a JSON error body
pub fn json_error_response(status: u16, message: &str) -> Response {
    let body = json!({ "error": message }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| fallback_response())
}

/// Used when the builder itself rejects the response.
fn fallback_response() -> Response {
    let mut resp = Response::new(Body::from(r#"{"error":"Internal server error"}"#));
    if let Ok(status) = 500u16.try_into() {
        *resp.status_mut() = status;
    }
    resp
}
