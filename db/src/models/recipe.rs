use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub youtube_video_id: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: String,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    /// Average rating times ten, 45 is 4.5 stars
    pub rating: i32,
    pub view_count: i32,
    pub is_premium: bool,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub nutrition_info: Option<String>,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedRecipe {
    pub id: i64,
    pub user_id: Uuid,
    pub recipe_id: i32,
    pub created_at: DateTime<Utc>,
}

/// A saved recipe joined with the recipe it points to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedRecipeEntry {
    pub saved_id: i64,
    pub saved_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub recipe: Recipe,
}
