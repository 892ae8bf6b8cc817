use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;

use crate::{dtos::recipe::SearchQuery, services};

/// Lists every recipe, best rated first.
///
/// # Output
/// - Success: array of recipes with `ingredients`, `instructions`, `nutrition_info`
///   and `tags` decoded
///
/// # Frontend Example
/// ```javascript
/// const recipes = await (await fetch('/api/recipes')).json();
/// ```
#[get("")]
pub async fn get_recipes(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let recipes = services::recipe::list_recipes(&pool).await?;
    Success::ok(recipes)
}

/// Case-insensitive search over name, description and tags.
/// An empty query returns the full list.
///
/// # Frontend Example
/// ```javascript
/// const hits = await (await fetch('/api/recipes/search?query=pasta')).json();
/// ```
#[get("/search")]
pub async fn get_search(
    query: web::Query<SearchQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let recipes = services::recipe::search_recipes(&pool, &query.query).await?;
    Success::ok(recipes)
}

/// Recipes whose category matches, ignoring case.
#[get("/category/{category}")]
pub async fn get_by_category(
    path: web::Path<String>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let recipes = services::recipe::recipes_by_category(&pool, &path).await?;
    Success::ok(recipes)
}

/// Single recipe by id.
///
/// # Output
/// - Success: the recipe
/// - Error: 404 Not Found when no recipe has this id
#[get("/{id}")]
pub async fn get_recipe(path: web::Path<i32>, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let recipe = services::recipe::get_recipe(&pool, path.into_inner()).await?;
    Success::ok(recipe)
}
