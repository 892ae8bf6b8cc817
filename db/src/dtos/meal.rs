use chrono::{DateTime, Utc};
use common::misc::MealType;
use uuid::Uuid;

#[derive(Debug)]
pub struct MealPlanCreateRequest {
    pub user_id: Uuid,
    pub recipe_id: i32,
    pub planned_date: DateTime<Utc>,
    pub meal_type: MealType,
    pub notes: Option<String>,
}
