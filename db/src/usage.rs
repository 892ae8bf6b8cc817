use chrono::{DateTime, Utc};
use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::usage::AiMessageUsage;

/// Usage row whose window has not reset yet.
pub async fn get_current_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Res<Option<AiMessageUsage>> {
    sqlx::query_as::<_, AiMessageUsage>(
        r#"
        SELECT * FROM ai_message_usage
        WHERE user_id = $1 AND reset_at > $2
        ORDER BY reset_at ASC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(now)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Adds one message to the window ending at `reset_at`, creating it when absent.
/// Single statement, so concurrent calls never lose an increment.
pub async fn increment_usage<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    reset_at: DateTime<Utc>,
) -> Res<AiMessageUsage> {
    sqlx::query_as::<_, AiMessageUsage>(
        r#"
        INSERT INTO ai_message_usage (user_id, message_count, reset_at)
        VALUES ($1, 1, $2)
        ON CONFLICT (user_id, reset_at)
        DO UPDATE SET message_count = ai_message_usage.message_count + 1, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(reset_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use common::misc::Role;
    use sqlx::PgPool;

    use super::*;
    use crate::{dtos::user::UserCreateRequest, user::insert_user};

    async fn new_user(pool: &PgPool) -> Uuid {
        insert_user(
            pool,
            UserCreateRequest {
                email: format!("{}@example.com", Uuid::new_v4()),
                name: None,
                login_method: "email".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn november() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap()
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn repeated_increments_share_one_row(pool: PgPool) {
        let user_id = new_user(&pool).await;

        let first = increment_usage(&pool, user_id, november()).await.unwrap();
        let second = increment_usage(&pool, user_id, november()).await.unwrap();

        assert_eq!(first.message_count, 1);
        assert_eq!(second.message_count, 2);
        assert_eq!(second.id, first.id);
    }

    #[sqlx::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn concurrent_increments_are_all_counted(pool: PgPool) {
        let user_id = new_user(&pool).await;

        let (a, b, c, d) = tokio::join!(
            increment_usage(&pool, user_id, november()),
            increment_usage(&pool, user_id, november()),
            increment_usage(&pool, user_id, november()),
            increment_usage(&pool, user_id, november()),
        );
        for result in [a, b, c, d] {
            result.unwrap();
        }

        let current = get_current_usage(&pool, user_id, november() - Duration::days(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.message_count, 4);
        assert!(
            get_current_usage(&pool, user_id, november())
                .await
                .unwrap()
                .is_none()
        );
    }
}
