// src/domain/prediction.rs

use crate::domain::round2;
use crate::errors::ServerError;
use crate::ml::{ModelBundle, ModelError};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Normalized prediction input, echoed back to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    pub area: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub city: String,
    pub property_type: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
    pub input_data: PredictionInput,
}

/// All of these become a 400.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A field was absent, zero, or empty.
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid input: {0}")]
    Malformed(String),

    #[error("Invalid input: {0}")]
    UnknownCategory(String),
}

impl From<ValidationError> for ServerError {
    fn from(err: ValidationError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}

impl PredictionInput {
    /// Coerces the raw JSON body. Conversion errors are reported before the
    /// presence check, and a zero number counts as missing.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = body.as_object().ok_or_else(|| {
            ValidationError::Malformed("request body must be a JSON object".into())
        })?;

        let input = Self {
            area: float_field(obj, "area")?,
            bedrooms: int_field(obj, "bedrooms")?,
            bathrooms: int_field(obj, "bathrooms")?,
            city: text_field(obj, "city")?,
            property_type: text_field(obj, "property_type")?,
        };

        // TODO: a zero area or room count is rejected as "missing"; revisit if
        // studio listings (0 bedrooms) ever need to be priced.
        if input.area == 0.0
            || input.bedrooms == 0
            || input.bathrooms == 0
            || input.city.is_empty()
            || input.property_type.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }

        Ok(input)
    }
}

fn float_field(obj: &Map<String, Value>, name: &str) -> Result<f64, ValidationError> {
    let value = match obj.get(name) {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::Malformed(format!("{name} must be a number")))
}

/// Floats are truncated toward zero; numeric strings must be whole numbers.
fn int_field(obj: &Map<String, Value>, name: &str) -> Result<i64, ValidationError> {
    let value = match obj.get(name) {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    value.ok_or_else(|| ValidationError::Malformed(format!("{name} must be an integer")))
}

fn text_field(obj: &Map<String, Value>, name: &str) -> Result<String, ValidationError> {
    match obj.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::Malformed(format!("{name} must be a string"))),
    }
}

/// Encodes, predicts, and rounds to cents. Unknown labels are a client error;
/// any other model failure is internal.
pub fn predict_price(
    bundle: &ModelBundle,
    input: PredictionInput,
) -> Result<PredictionResponse, ServerError> {
    let features = bundle
        .features(
            input.area,
            input.bedrooms,
            input.bathrooms,
            &input.city,
            &input.property_type,
        )
        .map_err(|e| match e {
            ModelError::UnknownLabel { .. } => {
                ServerError::from(ValidationError::UnknownCategory(e.to_string()))
            }
            other => ServerError::Computation(other.to_string()),
        })?;

    let raw = bundle
        .predict(&features)
        .map_err(|e| ServerError::Computation(e.to_string()))?;
    if !raw.is_finite() {
        return Err(ServerError::Computation(format!(
            "model produced a non-finite price ({raw})"
        )));
    }

    Ok(PredictionResponse {
        predicted_price: round2(raw),
        input_data: input,
    })
}
