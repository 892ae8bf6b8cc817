use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{error::Res, misc::Tier};
use db::models::{plan::SubscriptionPlan, usage::AiMessageUsage};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::{PlanRepository, UsageRepository};

/// Plan and usage lookups backed by the shared Postgres pool.
#[derive(Clone)]
pub struct PgEntitlementStore {
    pool: Arc<PgPool>,
}

impl PgEntitlementStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanRepository for PgEntitlementStore {
    async fn find_by_tier(&self, tier: Tier) -> Res<Option<SubscriptionPlan>> {
        db::plan::get_plan_by_tier(self.pool.as_ref(), tier).await
    }
}

#[async_trait]
impl UsageRepository for PgEntitlementStore {
    async fn find_current(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Res<Option<AiMessageUsage>> {
        db::usage::get_current_usage(self.pool.as_ref(), user_id, now).await
    }

    async fn increment(&self, user_id: Uuid, reset_at: DateTime<Utc>) -> Res<AiMessageUsage> {
        db::usage::increment_usage(self.pool.as_ref(), user_id, reset_at).await
    }
}
