use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MealPlan {
    pub id: i64,
    pub user_id: Uuid,
    pub recipe_id: i32,
    pub planned_date: DateTime<Utc>,
    pub meal_type: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MealPlanEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub meal: MealPlan,
    pub recipe_name: String,
    pub recipe_image_url: Option<String>,
}
