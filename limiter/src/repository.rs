use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{error::Res, misc::Tier};
use db::models::{plan::SubscriptionPlan, usage::AiMessageUsage};
use mockall::automock;
use uuid::Uuid;

#[automock]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn find_by_tier(&self, tier: Tier) -> Res<Option<SubscriptionPlan>>;
}

#[automock]
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Row whose `reset_at` is still ahead of `now`.
    async fn find_current(&self, user_id: Uuid, now: DateTime<Utc>)
    -> Res<Option<AiMessageUsage>>;
    /// Atomically adds one message to the window ending at `reset_at`.
    async fn increment(&self, user_id: Uuid, reset_at: DateTime<Utc>) -> Res<AiMessageUsage>;
}
