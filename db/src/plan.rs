use common::{
    error::{AppError, Res},
    misc::Tier,
};
use sqlx::{Executor, Postgres};

use crate::models::plan::SubscriptionPlan;

pub async fn get_all_plans<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<SubscriptionPlan>> {
    sqlx::query_as::<_, SubscriptionPlan>(
        "SELECT * FROM subscription_plans ORDER BY price_monthly ASC",
    )
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_plan_by_tier<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    tier: Tier,
) -> Res<Option<SubscriptionPlan>> {
    sqlx::query_as::<_, SubscriptionPlan>("SELECT * FROM subscription_plans WHERE tier = $1")
        .bind(tier.as_str())
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}
