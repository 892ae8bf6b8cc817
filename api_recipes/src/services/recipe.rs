use common::error::{AppError, Res};
use db::models::recipe::Recipe;
use serde::de::DeserializeOwned;
use sqlx::PgPool;

use crate::dtos::recipe::{NutritionInfo, RecipeResponse};

fn parse_json_column<T: DeserializeOwned>(column: Option<&str>) -> Res<Option<T>> {
    match column.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => serde_json::from_str(text).map(Some).map_err(AppError::from),
        None => Ok(None),
    }
}

/// Decodes the JSON text columns. A malformed column fails the whole recipe.
pub fn to_response(recipe: Recipe) -> Res<RecipeResponse> {
    let ingredients: Vec<String> =
        parse_json_column(recipe.ingredients.as_deref())?.unwrap_or_default();
    let instructions: Vec<String> =
        parse_json_column(recipe.instructions.as_deref())?.unwrap_or_default();
    let nutrition_info: Option<NutritionInfo> =
        parse_json_column(recipe.nutrition_info.as_deref())?;
    let tags: Vec<String> = parse_json_column(recipe.tags.as_deref())?.unwrap_or_default();

    Ok(RecipeResponse {
        id: recipe.id,
        name: recipe.name,
        description: recipe.description,
        image_url: recipe.image_url,
        youtube_video_id: recipe.youtube_video_id,
        prep_time: recipe.prep_time,
        cook_time: recipe.cook_time,
        servings: recipe.servings,
        difficulty: recipe.difficulty,
        category: recipe.category,
        cuisine: recipe.cuisine,
        rating: recipe.rating,
        view_count: recipe.view_count,
        is_premium: recipe.is_premium,
        ingredients,
        instructions,
        nutrition_info,
        tags,
        created_at: recipe.created_at,
    })
}

pub fn to_responses(recipes: Vec<Recipe>) -> Res<Vec<RecipeResponse>> {
    recipes.into_iter().map(to_response).collect()
}

pub async fn list_recipes(pool: &PgPool) -> Res<Vec<RecipeResponse>> {
    to_responses(db::recipe::get_all_recipes(pool).await?)
}

pub async fn search_recipes(pool: &PgPool, query: &str) -> Res<Vec<RecipeResponse>> {
    let query = query.trim();
    if query.is_empty() {
        return list_recipes(pool).await;
    }
    to_responses(db::recipe::search_recipes(pool, query).await?)
}

pub async fn recipes_by_category(pool: &PgPool, category: &str) -> Res<Vec<RecipeResponse>> {
    to_responses(db::recipe::get_recipes_by_category(pool, category.trim()).await?)
}

/// Fetches one recipe and counts the view.
pub async fn get_recipe(pool: &PgPool, recipe_id: i32) -> Res<RecipeResponse> {
    let recipe = db::recipe::get_recipe_by_id(pool, recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", recipe_id)))?;

    if let Err(e) = db::recipe::increment_view_count(pool, recipe_id).await {
        log::warn!("Failed to count view of recipe {}: {}", recipe_id, e);
    }

    to_response(recipe)
}
