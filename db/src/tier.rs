use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};

use crate::models::tier::TierCount;

pub async fn count_users_per_tier<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<TierCount>> {
    sqlx::query_as::<_, TierCount>(
        r#"
        SELECT subscription_tier AS tier, COUNT(*) AS users
        FROM users
        GROUP BY subscription_tier
        ORDER BY subscription_tier ASC
        "#,
    )
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}
