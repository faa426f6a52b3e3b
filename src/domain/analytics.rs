// src/domain/analytics.rs

use crate::domain::listing::Listing;
use crate::domain::round2;
use crate::errors::ServerError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Dashboard summary, recomputed from the dataset on every request.
#[derive(Debug, Serialize, PartialEq)]
pub struct AnalyticsSummary {
    pub total_listings: usize,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub city_data: Vec<CityStats>,
    pub price_trends: Vec<PricePoint>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CityStats {
    pub city: String,
    pub avg_price: f64,
    pub count: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PricePoint {
    pub area: i64,
    pub price: f64,
}

/// Builds the summary. An empty dataset has no mean or extrema, so it is
/// reported as a computation error rather than a zero-filled summary.
pub fn summarize(listings: &[Listing]) -> Result<AnalyticsSummary, ServerError> {
    if listings.is_empty() {
        return Err(ServerError::Computation(
            "cannot compute analytics over an empty dataset".into(),
        ));
    }

    let total = listings.len();
    let sum: f64 = listings.iter().map(|l| l.price).sum();

    let (min_price, max_price) = listings.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), l| (lo.min(l.price), hi.max(l.price)),
    );

    // city -> (sum, count); BTreeMap keeps the output ordered by city name
    let mut by_city: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for l in listings {
        let entry = by_city.entry(l.city.as_str()).or_insert((0.0, 0));
        entry.0 += l.price;
        entry.1 += 1;
    }

    let city_data = by_city
        .into_iter()
        .map(|(city, (sum, count))| CityStats {
            city: city.to_string(),
            avg_price: round2(sum / count as f64),
            count,
        })
        .collect();

    // sort_by_key is stable, equal areas keep file order
    let mut price_trends: Vec<PricePoint> = listings
        .iter()
        .map(|l| PricePoint {
            area: l.area,
            price: l.price,
        })
        .collect();
    price_trends.sort_by_key(|p| p.area);

    Ok(AnalyticsSummary {
        total_listings: total,
        avg_price: sum / total as f64,
        min_price,
        max_price,
        city_data,
        price_trends,
    })
}
