// src/dataset/file.rs

use crate::domain::listing::{Listing, COLUMNS};
use crate::errors::ArtifactError;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

/// Reads the dataset CSV. Every column must be present and fully populated;
/// anything else is a malformed artifact.
pub fn load_listings(path: &Path) -> Result<Vec<Listing>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.to_path_buf()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!("Read {} with shape {:?}", path.display(), df.shape());

    listings_from_frame(&df).map_err(|reason| ArtifactError::malformed(path, reason))
}

/// Writes the dataset with a header row. Integral prices are written without
/// a fractional part.
pub fn save_listings(path: &Path, listings: &[Listing]) -> Result<(), ArtifactError> {
    let mut df = frame_from_listings(listings)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;

    info!("Dataset saved: {} ({} records)", path.display(), listings.len());
    Ok(())
}

fn frame_from_listings(listings: &[Listing]) -> PolarsResult<DataFrame> {
    let areas: Vec<i64> = listings.iter().map(|l| l.area).collect();
    let bedrooms: Vec<i64> = listings.iter().map(|l| l.bedrooms).collect();
    let bathrooms: Vec<i64> = listings.iter().map(|l| l.bathrooms).collect();
    let cities: Vec<&str> = listings.iter().map(|l| l.city.as_str()).collect();
    let types: Vec<&str> = listings.iter().map(|l| l.property_type.as_str()).collect();

    let price = if listings.iter().all(|l| l.price.fract() == 0.0) {
        let prices: Vec<i64> = listings.iter().map(|l| l.price as i64).collect();
        Column::new(COLUMNS[5].into(), prices)
    } else {
        let prices: Vec<f64> = listings.iter().map(|l| l.price).collect();
        Column::new(COLUMNS[5].into(), prices)
    };

    DataFrame::new(vec![
        Column::new(COLUMNS[0].into(), areas),
        Column::new(COLUMNS[1].into(), bedrooms),
        Column::new(COLUMNS[2].into(), bathrooms),
        Column::new(COLUMNS[3].into(), cities),
        Column::new(COLUMNS[4].into(), types),
        price,
    ])
}

fn listings_from_frame(df: &DataFrame) -> Result<Vec<Listing>, String> {
    let area = typed_column(df, "area", &DataType::Int64)?;
    let bedrooms = typed_column(df, "bedrooms", &DataType::Int64)?;
    let bathrooms = typed_column(df, "bathrooms", &DataType::Int64)?;
    let city = typed_column(df, "city", &DataType::String)?;
    let property_type = typed_column(df, "property_type", &DataType::String)?;
    let price = typed_column(df, "price", &DataType::Float64)?;

    let area = area.i64().map_err(|e| e.to_string())?;
    let bedrooms = bedrooms.i64().map_err(|e| e.to_string())?;
    let bathrooms = bathrooms.i64().map_err(|e| e.to_string())?;
    let city = city.str().map_err(|e| e.to_string())?;
    let property_type = property_type.str().map_err(|e| e.to_string())?;
    let price = price.f64().map_err(|e| e.to_string())?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        // nulls were rejected in typed_column
        let missing = || format!("row {} has an empty field", i + 1);
        rows.push(Listing {
            area: area.get(i).ok_or_else(missing)?,
            bedrooms: bedrooms.get(i).ok_or_else(missing)?,
            bathrooms: bathrooms.get(i).ok_or_else(missing)?,
            city: city.get(i).ok_or_else(missing)?.to_string(),
            property_type: property_type.get(i).ok_or_else(missing)?.to_string(),
            price: price.get(i).ok_or_else(missing)?,
        });
    }

    Ok(rows)
}

/// Fetches `name` cast to `dtype`. Values that fail the cast become nulls, so
/// a null count above zero means empty or non-numeric cells.
fn typed_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Series, String> {
    let col = df
        .column(name)
        .map_err(|_| format!("missing column '{name}'"))?;
    let series = col
        .as_materialized_series()
        .cast(dtype)
        .map_err(|e| format!("column '{name}': {e}"))?;

    let nulls = series.null_count();
    if nulls > 0 {
        return Err(format!(
            "column '{name}' has {nulls} empty or invalid value(s)"
        ));
    }
    Ok(series)
}
