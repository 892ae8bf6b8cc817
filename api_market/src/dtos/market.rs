use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNTRY: &str = "NZ";

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

#[derive(Debug, Deserialize)]
pub struct ProductSearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    pub supermarket: String,
    /// Cents
    pub price: i32,
    pub unit: Option<String>,
}

/// One product as sold by several supermarkets, cheapest offer first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceComparison {
    pub name: String,
    pub offers: Vec<Offer>,
    /// Difference in cents between the dearest and the cheapest offer.
    pub spread: i32,
}
