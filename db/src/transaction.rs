use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::transaction::{RevenueTotal, Transaction};

pub async fn get_transactions_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        "SELECT * FROM transactions WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Succeeded payments summed per currency.
pub async fn get_revenue_totals<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<RevenueTotal>> {
    sqlx::query_as::<_, RevenueTotal>(
        r#"
        SELECT currency,
               SUM(amount)::BIGINT AS total_cents,
               COUNT(*) AS transaction_count
        FROM transactions
        WHERE status = 'succeeded'
        GROUP BY currency
        ORDER BY currency ASC
        "#,
    )
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}
