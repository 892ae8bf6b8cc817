use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SupermarketProduct {
    pub id: i32,
    pub name: String,
    pub supermarket: String,
    /// Cents
    pub price: i32,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub country: String,
    pub last_updated: DateTime<Utc>,
}
