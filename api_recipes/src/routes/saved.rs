use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{
    error::Res,
    http::{Done, Success},
    jwt::JwtClaims,
};
use sqlx::PgPool;

use crate::{
    dtos::recipe::SaveRequest,
    services::saved::{self, PgSavedRecipes},
};

/// Lists the caller's saved recipes, most recently saved first.
///
/// # Frontend Example
/// ```javascript
/// const saved = await (await fetch('/api/account/saved', {
///   headers: { 'Authorization': `Bearer ${localStorage.getItem('authToken')}` }
/// })).json();
/// // [{ id: 12, saved_at: "...", recipe: { id: 3, name: "Rustic Pasta Rigatoni", ... } }]
/// ```
#[get("")]
pub async fn get_saved(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgSavedRecipes::new(pool.get_ref().clone());
    let recipes = saved::list_saved(&repo, claims.user_id).await?;
    Success::ok(recipes)
}

/// Saves a recipe for the caller. Saving an already saved recipe is a no-op.
///
/// # Input
/// - `{ "recipe_id": 3 }`
///
/// # Output
/// - Success: `{ "success": true }`
/// - Error: 404 when the recipe does not exist
#[post("/save")]
pub async fn post_save(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<SaveRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgSavedRecipes::new(pool.get_ref().clone());
    saved::save_recipe(&repo, claims.user_id, req.recipe_id).await?;
    Success::ok(Done::new())
}

/// Removes a recipe from the caller's saved list.
#[post("/unsave")]
pub async fn post_unsave(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<SaveRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgSavedRecipes::new(pool.get_ref().clone());
    saved::unsave_recipe(&repo, claims.user_id, req.recipe_id).await?;
    Success::ok(Done::new())
}

/// `true` when the caller has saved the recipe.
#[get("/{recipe_id}")]
pub async fn get_is_saved(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<i32>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgSavedRecipes::new(pool.get_ref().clone());
    let is_saved = saved::is_saved(&repo, claims.user_id, path.into_inner()).await?;
    Success::ok(is_saved)
}
