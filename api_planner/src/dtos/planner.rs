use chrono::{DateTime, Utc};
use common::misc::MealType;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateAlertRequest {
    pub product_name: String,
    /// Cents
    pub target_price: i32,
}

#[derive(Debug, Deserialize)]
pub struct MealRangeQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub recipe_id: i32,
    pub planned_date: DateTime<Utc>,
    pub meal_type: MealType,
    pub notes: Option<String>,
}
