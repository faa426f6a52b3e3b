// src/state.rs

use crate::dataset::load_listings;
use crate::domain::Listing;
use crate::errors::ArtifactError;
use crate::ml::ModelBundle;
use std::path::Path;
use tracing::{info, warn};

/// Read-only data shared by every request. Built once before the server
/// binds and never mutated afterwards.
#[derive(Debug)]
pub struct AppState {
    pub listings: Vec<Listing>,
    pub bundle: ModelBundle,
}

impl AppState {
    pub fn new(listings: Vec<Listing>, bundle: ModelBundle) -> Self {
        Self { listings, bundle }
    }

    /// Loads both artifacts; either one missing or malformed is fatal.
    pub fn load(data_path: &Path, model_path: &Path) -> Result<Self, ArtifactError> {
        info!("Loading ML model from {}", model_path.display());
        let bundle = ModelBundle::load(model_path)?;
        info!(
            "Model loaded: {} trees, trained {}, test R² {:.4}",
            bundle.model.n_trees(),
            bundle.trained_at,
            bundle.test_score
        );

        info!("Loading dataset from {}", data_path.display());
        let listings = load_listings(data_path)?;
        info!("Dataset loaded: {} listings", listings.len());

        let state = Self::new(listings, bundle);
        state.warn_on_unencodable_rows();
        Ok(state)
    }

    /// A dataset swapped in after training may hold labels the encoders never
    /// saw. Analytics still work; predictions for those labels will 400.
    fn warn_on_unencodable_rows(&self) {
        let unknown = self
            .listings
            .iter()
            .filter(|l| {
                self.bundle.city_encoder.transform(&l.city).is_err()
                    || self.bundle.type_encoder.transform(&l.property_type).is_err()
            })
            .count();

        if unknown > 0 {
            warn!("{unknown} listing(s) use a city or property type unknown to the model");
        }
    }
}
