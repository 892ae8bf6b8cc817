use chrono::{DateTime, Utc};
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::meal::MealPlanCreateRequest,
    models::meal::{MealPlan, MealPlanEntry},
};

/// Planned meals with `start <= planned_date < end`, earliest first.
pub async fn get_meal_plans<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Res<Vec<MealPlanEntry>> {
    sqlx::query_as::<_, MealPlanEntry>(
        r#"
        SELECT mp.*, r.name AS recipe_name, r.image_url AS recipe_image_url
        FROM meal_plans mp
        JOIN recipes r ON r.id = mp.recipe_id
        WHERE mp.user_id = $1 AND mp.planned_date >= $2 AND mp.planned_date < $3
        ORDER BY mp.planned_date ASC, mp.id ASC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_meal_plan<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: MealPlanCreateRequest,
) -> Res<MealPlan> {
    sqlx::query_as::<_, MealPlan>(
        r#"
        INSERT INTO meal_plans (user_id, recipe_id, planned_date, meal_type, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.recipe_id)
    .bind(data.planned_date)
    .bind(data.meal_type.as_str())
    .bind(data.notes)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
