// src/ml/trainer.rs

use crate::domain::listing::Listing;
use crate::ml::bundle::BUNDLE_VERSION;
use crate::ml::split::train_test_split;
use crate::ml::{
    FeatureVector, ForestConfig, LabelEncoder, ModelBundle, ModelError, RandomForestRegressor,
    Regressor, FEATURE_NAMES,
};
use chrono::Utc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Fraction of rows held out for the test score.
    pub test_size: f64,
    /// Seeds the train/test shuffle.
    pub split_seed: u64,
    pub forest: ForestConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            split_seed: 42,
            forest: ForestConfig::default(),
        }
    }
}

/// Fits both encoders on the full table, then the forest on the training
/// partition. Scores are reported, never checked against a threshold.
pub fn train(listings: &[Listing], cfg: &TrainConfig) -> Result<ModelBundle, ModelError> {
    let city_encoder = LabelEncoder::fit("city", listings.iter().map(|l| l.city.as_str()));
    let type_encoder = LabelEncoder::fit(
        "property_type",
        listings.iter().map(|l| l.property_type.as_str()),
    );
    for enc in [&city_encoder, &type_encoder] {
        for code in 0..enc.classes().len() {
            debug!("{} {code} = {}", enc.field(), enc.inverse(code)?);
        }
    }

    let mut features: Vec<FeatureVector> = Vec::with_capacity(listings.len());
    for l in listings {
        features.push([
            l.area as f64,
            l.bedrooms as f64,
            l.bathrooms as f64,
            city_encoder.transform(&l.city)? as f64,
            type_encoder.transform(&l.property_type)? as f64,
        ]);
    }
    let targets: Vec<f64> = listings.iter().map(|l| l.price).collect();

    let (train_idx, test_idx) = train_test_split(listings.len(), cfg.test_size, cfg.split_seed)?;
    let pick = |idx: &[usize]| -> (Vec<FeatureVector>, Vec<f64>) {
        idx.iter().map(|&i| (features[i], targets[i])).unzip()
    };
    let (x_train, y_train) = pick(&train_idx);
    let (x_test, y_test) = pick(&test_idx);

    info!(
        "Training random forest ({} trees) on {} rows, holding out {}",
        cfg.forest.n_estimators,
        x_train.len(),
        x_test.len()
    );

    let mut model = RandomForestRegressor::new(cfg.forest.clone());
    model.fit(&x_train, &y_train)?;

    let train_score = model.score(&x_train, &y_train)?;
    let test_score = model.score(&x_test, &y_test)?;
    info!("Model training score: {train_score:.4}");
    info!("Model test score: {test_score:.4}");

    Ok(ModelBundle {
        version: BUNDLE_VERSION,
        trained_at: Utc::now(),
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        model,
        city_encoder,
        type_encoder,
        train_score,
        test_score,
    })
}
