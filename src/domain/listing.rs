/// One row of the dataset. Field order matches the CSV header.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub area: i64, // square feet
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub city: String,
    pub property_type: String,
    pub price: f64,
}

/// Column names, in file order.
pub const COLUMNS: [&str; 6] = [
    "area",
    "bedrooms",
    "bathrooms",
    "city",
    "property_type",
    "price",
];
