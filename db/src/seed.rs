use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::dtos::seed::{ProductCreateRequest, RecipeCreateRequest};

pub async fn count_recipes<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn count_products<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM supermarket_products")
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_recipe<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: RecipeCreateRequest,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO recipes (name, description, image_url, youtube_video_id, prep_time, cook_time,
                             servings, difficulty, category, cuisine, rating,
                             ingredients, instructions, nutrition_info, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.image_url)
    .bind(data.youtube_video_id)
    .bind(data.prep_time)
    .bind(data.cook_time)
    .bind(data.servings)
    .bind(data.difficulty)
    .bind(data.category)
    .bind(data.cuisine)
    .bind(data.rating)
    .bind(data.ingredients)
    .bind(data.instructions)
    .bind(data.nutrition_info)
    .bind(data.tags)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_product<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ProductCreateRequest,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO supermarket_products (name, supermarket, price, unit, category, country)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(data.name)
    .bind(data.supermarket)
    .bind(data.price)
    .bind(data.unit)
    .bind(data.category)
    .bind(data.country)
    .execute(executor)
    .await?;
    Ok(())
}
