use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::recipe::SavedRecipeEntry;

pub async fn get_saved_recipes<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<SavedRecipeEntry>> {
    sqlx::query_as::<_, SavedRecipeEntry>(
        r#"
        SELECT sr.id AS saved_id, sr.created_at AS saved_at, r.*
        FROM saved_recipes sr
        JOIN recipes r ON r.id = sr.recipe_id
        WHERE sr.user_id = $1
        ORDER BY sr.created_at DESC, sr.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn is_recipe_saved<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    recipe_id: i32,
) -> Res<bool> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM saved_recipes WHERE user_id = $1 AND recipe_id = $2)",
    )
    .bind(user_id)
    .bind(recipe_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Saving twice keeps a single row.
pub async fn save_recipe<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    recipe_id: i32,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO saved_recipes (user_id, recipe_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, recipe_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(recipe_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn unsave_recipe<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    recipe_id: i32,
) -> Res<()> {
    sqlx::query("DELETE FROM saved_recipes WHERE user_id = $1 AND recipe_id = $2")
        .bind(user_id)
        .bind(recipe_id)
        .execute(executor)
        .await?;
    Ok(())
}
