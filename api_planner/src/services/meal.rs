use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use common::{
    error::{AppError, Res},
    misc::Feature,
};
use db::{
    dtos::meal::MealPlanCreateRequest,
    models::{
        meal::{MealPlan, MealPlanEntry},
        user::User,
    },
};
use limiter::entitlements::Entitlements;
use sqlx::PgPool;

use crate::dtos::planner::{CreateMealRequest, MealRangeQuery};

/// Days shown when the caller gives no end date.
pub const DEFAULT_RANGE_DAYS: i64 = 7;

/// Resolves the requested window. Without a start it begins at midnight UTC today.
pub fn resolve_range(
    query: &MealRangeQuery,
    now: DateTime<Utc>,
) -> Res<(DateTime<Utc>, DateTime<Utc>)> {
    let start = match query.start {
        Some(start) => start,
        None => now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .ok_or_else(|| AppError::Internal(format!("Cannot compute midnight of {}", now)))?,
    };
    let end = query
        .end
        .unwrap_or_else(|| start + Duration::days(DEFAULT_RANGE_DAYS));

    if start >= end {
        return Err(AppError::BadRequest(
            "start must be before end".to_string(),
        ));
    }
    Ok((start, end))
}

pub fn to_create_request(user: &User, req: CreateMealRequest) -> MealPlanCreateRequest {
    MealPlanCreateRequest {
        user_id: user.id,
        recipe_id: req.recipe_id,
        planned_date: req.planned_date,
        meal_type: req.meal_type,
        notes: req
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty()),
    }
}

/// Planned meals in the window, earliest first. Requires a plan with meal planning.
pub async fn list_meals(
    pool: &Arc<PgPool>,
    user: &User,
    query: &MealRangeQuery,
) -> Res<Vec<MealPlanEntry>> {
    Entitlements::from_pool(pool.clone())
        .require_feature(user.tier(), Feature::MealPlanning)
        .await?;
    let (start, end) = resolve_range(query, Utc::now())?;
    db::meal::get_meal_plans(pool.as_ref(), user.id, start, end).await
}

pub async fn create_meal(
    pool: &Arc<PgPool>,
    user: &User,
    req: CreateMealRequest,
) -> Res<MealPlan> {
    Entitlements::from_pool(pool.clone())
        .require_feature(user.tier(), Feature::MealPlanning)
        .await?;

    if db::recipe::get_recipe_by_id(pool.as_ref(), req.recipe_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Recipe {} not found",
            req.recipe_id
        )));
    }

    db::meal::insert_meal_plan(pool.as_ref(), to_create_request(user, req)).await
}
