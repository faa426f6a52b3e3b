// src/dataset/synth.rs

use crate::domain::listing::Listing;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SynthError {
    #[error("at least one city is required")]
    NoCities,

    #[error("at least one property type is required")]
    NoPropertyTypes,

    #[error("{field} range {range:?} is empty")]
    EmptyRange { field: &'static str, range: Range<i64> },
}

#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub record_count: usize,
    pub random_seed: u64,
    /// City name and its base price. Also the city domain.
    pub city_base_prices: Vec<(String, i64)>,
    pub property_types: Vec<String>,
    /// Upper bounds are exclusive.
    pub area_range: Range<i64>,
    pub bedroom_range: Range<i64>,
    pub bathroom_range: Range<i64>,
    pub noise_range: Range<i64>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            record_count: 100,
            random_seed: 42,
            city_base_prices: vec![
                ("New York".to_string(), 500_000),
                ("Los Angeles".to_string(), 450_000),
                ("Chicago".to_string(), 300_000),
                ("Houston".to_string(), 250_000),
                ("Phoenix".to_string(), 280_000),
            ],
            property_types: vec![
                "House".to_string(),
                "Apartment".to_string(),
                "Condo".to_string(),
            ],
            area_range: 500..5000,
            bedroom_range: 1..6,
            bathroom_range: 1..4,
            noise_range: -50_000..50_000,
        }
    }
}

impl SynthConfig {
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.city_base_prices.is_empty() {
            return Err(SynthError::NoCities);
        }
        if self.property_types.is_empty() {
            return Err(SynthError::NoPropertyTypes);
        }
        for (field, range) in [
            ("area", &self.area_range),
            ("bedrooms", &self.bedroom_range),
            ("bathrooms", &self.bathroom_range),
            ("noise", &self.noise_range),
        ] {
            if range.is_empty() {
                return Err(SynthError::EmptyRange {
                    field,
                    range: range.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Price = city base + 100/sqft + 50k/bedroom + 30k/bathroom + noise.
pub fn listing_price(base: i64, area: i64, bedrooms: i64, bathrooms: i64, noise: i64) -> i64 {
    base + area * 100 + bedrooms * 50_000 + bathrooms * 30_000 + noise
}

/// Draws `record_count` listings. The same config always yields the same rows.
pub fn synthesize(cfg: &SynthConfig) -> Result<Vec<Listing>, SynthError> {
    cfg.validate()?;

    let mut rng = StdRng::seed_from_u64(cfg.random_seed);
    let mut rows = Vec::with_capacity(cfg.record_count);

    for _ in 0..cfg.record_count {
        let area = rng.gen_range(cfg.area_range.clone());
        let bedrooms = rng.gen_range(cfg.bedroom_range.clone());
        let bathrooms = rng.gen_range(cfg.bathroom_range.clone());
        let (city, base) = &cfg.city_base_prices[rng.gen_range(0..cfg.city_base_prices.len())];
        let property_type = &cfg.property_types[rng.gen_range(0..cfg.property_types.len())];
        let noise = rng.gen_range(cfg.noise_range.clone());

        rows.push(Listing {
            area,
            bedrooms,
            bathrooms,
            city: city.clone(),
            property_type: property_type.clone(),
            price: listing_price(*base, area, bedrooms, bathrooms, noise) as f64,
        });
    }

    Ok(rows)
}
