use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::{models::product::SupermarketProduct, recipe::escape_like};

pub const SEARCH_LIMIT: i64 = 50;

pub async fn search_products<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    query: &str,
    country: &str,
) -> Res<Vec<SupermarketProduct>> {
    let pattern = format!("%{}%", escape_like(query));
    sqlx::query_as::<_, SupermarketProduct>(
        r#"
        SELECT * FROM supermarket_products
        WHERE country = $1 AND (name ILIKE $2 OR category ILIKE $2)
        ORDER BY name ASC, price ASC
        LIMIT $3
        "#,
    )
    .bind(country)
    .bind(pattern)
    .bind(SEARCH_LIMIT)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_products_by_supermarket<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    supermarket: &str,
    country: &str,
) -> Res<Vec<SupermarketProduct>> {
    sqlx::query_as::<_, SupermarketProduct>(
        r#"
        SELECT * FROM supermarket_products
        WHERE LOWER(supermarket) = LOWER($1) AND country = $2
        ORDER BY category ASC, name ASC
        "#,
    )
    .bind(supermarket)
    .bind(country)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}
