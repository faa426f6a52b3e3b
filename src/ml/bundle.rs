// src/ml/bundle.rs

use crate::errors::ArtifactError;
use crate::ml::{
    FeatureVector, LabelEncoder, ModelError, RandomForestRegressor, Regressor, FEATURE_NAMES,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub const BUNDLE_VERSION: u32 = 1;

/// Everything the server needs to answer predictions, persisted as one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub version: u32,
    pub trained_at: DateTime<Utc>,
    pub feature_names: Vec<String>,
    pub model: RandomForestRegressor,
    pub city_encoder: LabelEncoder,
    pub type_encoder: LabelEncoder,
    pub train_score: f64,
    pub test_score: f64,
}

impl ModelBundle {
    /// Encodes one listing's inputs in model order.
    pub fn features(
        &self,
        area: f64,
        bedrooms: i64,
        bathrooms: i64,
        city: &str,
        property_type: &str,
    ) -> Result<FeatureVector, ModelError> {
        let city_code = self.city_encoder.transform(city)?;
        let type_code = self.type_encoder.transform(property_type)?;

        Ok([
            area,
            bedrooms as f64,
            bathrooms as f64,
            city_code as f64,
            type_code as f64,
        ])
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        self.model.predict(features)
    }

    /// Writes to a sibling temp file and renames it into place so a reader
    /// never sees a half-written bundle.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let json = serde_json::to_vec(self)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;

        info!("Model bundle saved to {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let bundle: ModelBundle = serde_json::from_slice(&bytes)
            .map_err(|e| ArtifactError::malformed(path, e.to_string()))?;
        bundle.validate(path)?;

        Ok(bundle)
    }

    fn validate(&self, path: &Path) -> Result<(), ArtifactError> {
        if self.version != BUNDLE_VERSION {
            return Err(ArtifactError::malformed(
                path,
                format!("unsupported bundle version {}", self.version),
            ));
        }
        if self.feature_names != FEATURE_NAMES {
            return Err(ArtifactError::malformed(
                path,
                format!(
                    "feature order {:?} does not match {:?}",
                    self.feature_names, FEATURE_NAMES
                ),
            ));
        }
        if !self.model.is_well_formed() {
            return Err(ArtifactError::malformed(path, "model has no usable trees"));
        }
        for enc in [&self.city_encoder, &self.type_encoder] {
            if enc.classes().is_empty() || !enc.is_well_formed() {
                return Err(ArtifactError::malformed(
                    path,
                    format!("encoder for '{}' is empty or unsorted", enc.field()),
                ));
            }
        }
        Ok(())
    }
}
