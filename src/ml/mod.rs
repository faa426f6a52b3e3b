pub mod bundle;
pub mod encoder;
pub mod forest;
pub mod metrics;
pub mod split;
pub mod trainer;
pub mod tree;

pub use bundle::ModelBundle;
pub use encoder::LabelEncoder;
pub use forest::{ForestConfig, RandomForestRegressor};
pub use trainer::{train, TrainConfig};

use thiserror::Error;

/// Number of model inputs.
pub const N_FEATURES: usize = 5;

/// Model input order. Anything building a `FeatureVector` must follow it.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "area",
    "bedrooms",
    "bathrooms",
    "city_encoded",
    "type_encoded",
];

/// `[area, bedrooms, bathrooms, city_code, type_code]`
pub type FeatureVector = [f64; N_FEATURES];

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("unknown {field} '{label}'")]
    UnknownLabel { field: String, label: String },

    #[error("no {field} label for code {code}")]
    UnknownCode { field: String, code: usize },

    #[error("need at least {needed} rows to train, got {got}")]
    NotEnoughRows { needed: usize, got: usize },

    #[error("feature and target lengths differ ({features} vs {targets})")]
    LengthMismatch { features: usize, targets: usize },

    #[error("model has not been fitted")]
    NotFitted,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Anything that can stand in for the forest: fit on rows, predict one row,
/// report R² on a labelled set.
pub trait Regressor {
    fn fit(&mut self, x: &[FeatureVector], y: &[f64]) -> Result<(), ModelError>;

    fn predict(&self, x: &FeatureVector) -> Result<f64, ModelError>;

    fn score(&self, x: &[FeatureVector], y: &[f64]) -> Result<f64, ModelError> {
        let predicted = x
            .iter()
            .map(|row| self.predict(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(metrics::r2_score(y, &predicted))
    }
}
