use common::{
    error::{AppError, Res},
    misc::ChatRole,
};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::chat::ChatMessage;

/// Oldest first, capped at `limit`.
pub async fn get_chat_history<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    limit: i64,
) -> Res<Vec<ChatMessage>> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT * FROM chat_messages
        WHERE user_id = $1
        ORDER BY created_at ASC, id ASC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// The `limit` most recent messages, returned oldest first.
pub async fn get_recent_messages<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    limit: i64,
) -> Res<Vec<ChatMessage>> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT * FROM (
            SELECT * FROM chat_messages
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
        ) recent
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_chat_message<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    role: ChatRole,
    content: &str,
) -> Res<ChatMessage> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (user_id, role, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(role.as_str())
    .bind(content)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
