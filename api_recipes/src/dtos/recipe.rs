use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Recipe with its JSON text columns decoded.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
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
    pub rating: i32,
    pub view_count: i32,
    pub is_premium: bool,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub nutrition_info: Option<NutritionInfo>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SavedRecipeResponse {
    pub id: i64,
    pub saved_at: DateTime<Utc>,
    pub recipe: RecipeResponse,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub recipe_id: i32,
}
