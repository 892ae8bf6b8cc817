use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::alert::PriceAlertCreateRequest, models::alert::PriceAlert};

pub async fn get_active_alerts<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<PriceAlert>> {
    sqlx::query_as::<_, PriceAlert>(
        r#"
        SELECT * FROM price_alerts
        WHERE user_id = $1 AND is_active = TRUE
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_alert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: PriceAlertCreateRequest,
) -> Res<PriceAlert> {
    sqlx::query_as::<_, PriceAlert>(
        r#"
        INSERT INTO price_alerts (user_id, product_name, target_price)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.product_name)
    .bind(data.target_price)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
