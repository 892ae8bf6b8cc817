use std::sync::Arc;

use chrono::{DateTime, Datelike, Months, Utc};
use common::{
    error::{AppError, Res},
    misc::{Feature, Tier},
};
use db::models::usage::AiMessageUsage;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    pg::PgEntitlementStore,
    repository::{PlanRepository, UsageRepository},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiUsage {
    pub limit: i32,
    pub used: i32,
    pub unlimited: bool,
}

/// Answers what a tier may do and how much of its AI allowance has been spent.
pub struct Entitlements<P, U>
where
    P: PlanRepository + 'static,
    U: UsageRepository + 'static,
{
    plans: Arc<P>,
    usage: Arc<U>,
}

impl Entitlements<PgEntitlementStore, PgEntitlementStore> {
    pub fn from_pool(pool: Arc<PgPool>) -> Self {
        let store = Arc::new(PgEntitlementStore::new(pool));
        Self::new(store.clone(), store)
    }
}

impl<P, U> Entitlements<P, U>
where
    P: PlanRepository + 'static,
    U: UsageRepository + 'static,
{
    pub fn new(plans: Arc<P>, usage: Arc<U>) -> Self {
        Self { plans, usage }
    }

    /// Whether the plan of `tier` includes `feature`. Missing plans grant nothing.
    pub async fn can_access(&self, tier: Tier, feature: Feature) -> Res<bool> {
        match self.plans.find_by_tier(tier).await? {
            Some(plan) => Ok(plan.has_feature(feature)),
            None => {
                log::warn!("No subscription plan configured for tier '{}'", tier);
                Ok(false)
            }
        }
    }

    pub async fn require_feature(&self, tier: Tier, feature: Feature) -> Res<()> {
        if self.can_access(tier, feature).await? {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "The {} plan does not include {}",
                tier, feature
            )))
        }
    }

    pub async fn current_ai_usage(&self, user_id: Uuid, tier: Tier) -> Res<AiUsage> {
        self.current_ai_usage_at(user_id, tier, Utc::now()).await
    }

    /// Reads the counter without creating a row.
    pub async fn current_ai_usage_at(
        &self,
        user_id: Uuid,
        tier: Tier,
        now: DateTime<Utc>,
    ) -> Res<AiUsage> {
        let limit = match self.plans.find_by_tier(tier).await? {
            Some(plan) => plan.max_ai_messages,
            None => {
                log::warn!("No subscription plan configured for tier '{}'", tier);
                return Ok(AiUsage {
                    limit: 0,
                    used: 0,
                    unlimited: false,
                });
            }
        };

        let used = self
            .usage
            .find_current(user_id, now)
            .await?
            .map(|usage| usage.message_count)
            .unwrap_or(0);

        Ok(AiUsage {
            limit,
            used,
            unlimited: limit == 0,
        })
    }

    pub async fn increment_ai_usage(&self, user_id: Uuid) -> Res<AiMessageUsage> {
        self.increment_ai_usage_at(user_id, Utc::now()).await
    }

    pub async fn increment_ai_usage_at(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Res<AiMessageUsage> {
        let reset_at = next_reset_at(now)?;
        self.usage.increment(user_id, reset_at).await
    }
}

/// Midnight UTC on the first day of the month after `now`.
pub fn next_reset_at(now: DateTime<Utc>) -> Res<DateTime<Utc>> {
    now.date_naive()
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Internal(format!("Cannot compute usage reset after {}", now)))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::{MockPlanRepository, MockUsageRepository};
    use db::models::plan::SubscriptionPlan;

    fn plan(tier: Tier, max_ai_messages: i32, meal_planning: bool) -> SubscriptionPlan {
        let now = Utc::now();
        SubscriptionPlan {
            id: 1,
            name: tier.to_string(),
            tier: tier.to_string(),
            price_monthly: 0,
            price_yearly: 0,
            stripe_price_id_monthly: None,
            stripe_price_id_yearly: None,
            features: "[]".to_string(),
            max_ai_messages,
            max_recipe_saves: 0,
            has_price_alerts: false,
            has_meal_planning: meal_planning,
            has_pdf_export: false,
            has_exclusive_recipes: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Counter store that behaves like the upsert in Postgres.
    #[derive(Default)]
    struct InMemoryUsage {
        rows: Mutex<Vec<AiMessageUsage>>,
    }

    #[async_trait]
    impl UsageRepository for InMemoryUsage {
        async fn find_current(
            &self,
            user_id: Uuid,
            now: DateTime<Utc>,
        ) -> Res<Option<AiMessageUsage>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|row| row.user_id == user_id && row.reset_at > now)
                .min_by_key(|row| row.reset_at)
                .cloned())
        }

        async fn increment(
            &self,
            user_id: Uuid,
            reset_at: DateTime<Utc>,
        ) -> Res<AiMessageUsage> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(row) = rows
                .iter_mut()
                .find(|row| row.user_id == user_id && row.reset_at == reset_at)
            {
                row.message_count += 1;
                return Ok(row.clone());
            }
            let now = Utc::now();
            let row = AiMessageUsage {
                id: rows.len() as i64 + 1,
                user_id,
                message_count: 1,
                reset_at,
                created_at: now,
                updated_at: now,
            };
            rows.push(row.clone());
            Ok(row)
        }
    }

    fn free_plan_repo() -> MockPlanRepository {
        let mut plans = MockPlanRepository::new();
        plans
            .expect_find_by_tier()
            .with(eq(Tier::Free))
            .returning(|tier| Ok(Some(plan(tier, 20, false))));
        plans
    }

    #[test]
    fn reset_is_first_day_of_next_month() {
        let now = Utc.with_ymd_and_hms(2025, 3, 17, 15, 42, 7).unwrap();
        assert_eq!(
            next_reset_at(now).unwrap(),
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn december_rolls_over_to_january() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            next_reset_at(now).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn free_tier_cannot_plan_meals_but_pro_can() {
        let mut plans = MockPlanRepository::new();
        plans
            .expect_find_by_tier()
            .with(eq(Tier::Free))
            .returning(|tier| Ok(Some(plan(tier, 20, false))));
        plans
            .expect_find_by_tier()
            .with(eq(Tier::Pro))
            .returning(|tier| Ok(Some(plan(tier, 0, true))));

        let entitlements = Entitlements::new(Arc::new(plans), Arc::new(MockUsageRepository::new()));

        assert!(
            !entitlements
                .can_access(Tier::Free, Feature::MealPlanning)
                .await
                .unwrap()
        );
        assert!(
            entitlements
                .can_access(Tier::Pro, Feature::MealPlanning)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn missing_feature_is_forbidden() {
        let entitlements = Entitlements::new(
            Arc::new(free_plan_repo()),
            Arc::new(MockUsageRepository::new()),
        );

        let err = entitlements
            .require_feature(Tier::Free, Feature::MealPlanning)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn missing_plan_grants_nothing() {
        let mut plans = MockPlanRepository::new();
        plans.expect_find_by_tier().returning(|_| Ok(None));
        let entitlements = Entitlements::new(Arc::new(plans), Arc::new(MockUsageRepository::new()));

        assert!(
            !entitlements
                .can_access(Tier::Premium, Feature::PriceAlerts)
                .await
                .unwrap()
        );
        let usage = entitlements
            .current_ai_usage(Uuid::new_v4(), Tier::Premium)
            .await
            .unwrap();
        assert_eq!(
            usage,
            AiUsage {
                limit: 0,
                used: 0,
                unlimited: false
            }
        );
    }

    #[tokio::test]
    async fn usage_without_row_is_zero_and_creates_nothing() {
        let mut usage = MockUsageRepository::new();
        usage.expect_find_current().returning(|_, _| Ok(None));
        usage.expect_increment().never();

        let entitlements = Entitlements::new(Arc::new(free_plan_repo()), Arc::new(usage));
        let current = entitlements
            .current_ai_usage(Uuid::new_v4(), Tier::Free)
            .await
            .unwrap();

        assert_eq!(current.used, 0);
        assert_eq!(current.limit, 20);
        assert!(!current.unlimited);
    }

    #[tokio::test]
    async fn zero_message_cap_is_unlimited() {
        let mut plans = MockPlanRepository::new();
        plans
            .expect_find_by_tier()
            .returning(|tier| Ok(Some(plan(tier, 0, true))));
        let mut usage = MockUsageRepository::new();
        usage.expect_find_current().returning(|_, _| Ok(None));

        let entitlements = Entitlements::new(Arc::new(plans), Arc::new(usage));
        let current = entitlements
            .current_ai_usage(Uuid::new_v4(), Tier::Pro)
            .await
            .unwrap();

        assert!(current.unlimited);
    }

    #[tokio::test]
    async fn first_increment_opens_a_window_ending_next_month() {
        let user_id = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap();
        let entitlements = Entitlements::new(
            Arc::new(MockPlanRepository::new()),
            Arc::new(InMemoryUsage::default()),
        );

        let row = entitlements
            .increment_ai_usage_at(user_id, now)
            .await
            .unwrap();

        assert_eq!(row.message_count, 1);
        assert_eq!(row.reset_at, Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn twenty_messages_exhaust_the_free_allowance() {
        let user_id = Uuid::new_v4();
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap();
        let entitlements =
            Entitlements::new(Arc::new(free_plan_repo()), Arc::new(InMemoryUsage::default()));

        for _ in 0..20 {
            entitlements
                .increment_ai_usage_at(user_id, now)
                .await
                .unwrap();
        }

        let usage = entitlements
            .current_ai_usage_at(user_id, Tier::Free, now)
            .await
            .unwrap();
        assert_eq!(
            usage,
            AiUsage {
                limit: 20,
                used: 20,
                unlimited: false
            }
        );
    }

    #[tokio::test]
    async fn counter_starts_over_in_the_next_month() {
        let user_id = Uuid::new_v4();
        let june = Utc.with_ymd_and_hms(2025, 6, 30, 23, 0, 0).unwrap();
        let july = Utc.with_ymd_and_hms(2025, 7, 1, 0, 30, 0).unwrap();
        let entitlements =
            Entitlements::new(Arc::new(free_plan_repo()), Arc::new(InMemoryUsage::default()));

        for _ in 0..3 {
            entitlements
                .increment_ai_usage_at(user_id, june)
                .await
                .unwrap();
        }
        let row = entitlements
            .increment_ai_usage_at(user_id, july)
            .await
            .unwrap();

        assert_eq!(row.message_count, 1);
        let usage = entitlements
            .current_ai_usage_at(user_id, Tier::Free, july)
            .await
            .unwrap();
        assert_eq!(usage.used, 1);
    }
}
