pub mod analytics;
pub mod listing;
pub mod prediction;

pub use analytics::summarize;
pub use listing::Listing;
pub use prediction::{predict_price, PredictionInput, ValidationError};

/// Rounds half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
