use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::shopping::ShoppingItemCreateRequest, models::shopping::ShoppingListItem};

pub async fn get_shopping_list<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<ShoppingListItem>> {
    sqlx::query_as::<_, ShoppingListItem>(
        "SELECT * FROM shopping_list_items WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_shopping_item<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: ShoppingItemCreateRequest,
) -> Res<ShoppingListItem> {
    sqlx::query_as::<_, ShoppingListItem>(
        r#"
        INSERT INTO shopping_list_items (user_id, name, quantity, category, recipe_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.name)
    .bind(data.quantity)
    .bind(data.category)
    .bind(data.recipe_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Returns `None` when the item does not exist or belongs to someone else.
pub async fn set_item_completed<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    item_id: i64,
    completed: bool,
) -> Res<Option<ShoppingListItem>> {
    sqlx::query_as::<_, ShoppingListItem>(
        r#"
        UPDATE shopping_list_items
        SET completed = $1, updated_at = NOW()
        WHERE id = $2 AND user_id = $3
        RETURNING *
        "#,
    )
    .bind(completed)
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Number of rows removed, 0 when the item is not the user's.
pub async fn delete_shopping_item<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    item_id: i64,
) -> Res<u64> {
    let result = sqlx::query("DELETE FROM shopping_list_items WHERE id = $1 AND user_id = $2")
        .bind(item_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn clear_completed_items<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<u64> {
    let result =
        sqlx::query("DELETE FROM shopping_list_items WHERE user_id = $1 AND completed = TRUE")
            .bind(user_id)
            .execute(executor)
            .await?;
    Ok(result.rows_affected())
}
