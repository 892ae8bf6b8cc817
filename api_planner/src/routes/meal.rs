use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::{
    dtos::planner::{CreateMealRequest, MealRangeQuery},
    services,
};

/// Planned meals between `start` (inclusive) and `end` (exclusive).
/// Both are RFC 3339 timestamps. Defaults to the next seven days.
///
/// # Frontend Example
/// ```javascript
/// const meals = await (await fetch(
///   '/api/account/meals?start=2025-03-10T00:00:00Z&end=2025-03-17T00:00:00Z',
///   { headers: { 'Authorization': `Bearer ${localStorage.getItem('authToken')}` } }
/// )).json();
/// // [{ id: 1, recipe_id: 3, recipe_name: "...", planned_date: "...", meal_type: "dinner" }]
/// ```
#[get("")]
pub async fn get_meals(
    claims: web::ReqData<JwtClaims>,
    query: web::Query<MealRangeQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let meals = services::meal::list_meals(pool.get_ref(), &user, &query).await?;
    Success::ok(meals)
}

/// Adds a recipe to the meal plan.
///
/// # Input
/// - `{ "recipe_id": 3, "planned_date": "2025-03-12T18:00:00Z", "meal_type": "dinner", "notes": "double batch" }`
///
/// # Output
/// - Success: 201 with the planned meal
/// - Error: 403 without meal planning, 404 for an unknown recipe
#[post("")]
pub async fn post_meal(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreateMealRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let meal = services::meal::create_meal(pool.get_ref(), &user, req.into_inner()).await?;
    Success::created(meal)
}
