use std::sync::Arc;

use common::{
    error::{AppError, Res},
    misc::{BillingPeriod, Tier},
};
use db::models::{plan::SubscriptionPlan, user::User};
use limiter::repository::PlanRepository;
use sqlx::PgPool;

use crate::{
    dtos::sub::{CurrentSubscriptionResponse, PlanResponse},
    services::billing::{BillingGateway, CheckoutSpec},
};

/// Decodes the marketing lines. A malformed column fails the plan.
pub fn to_plan_response(plan: SubscriptionPlan) -> Res<PlanResponse> {
    let features: Vec<String> = if plan.features.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(&plan.features)?
    };

    Ok(PlanResponse {
        id: plan.id,
        name: plan.name,
        tier: plan.tier,
        price_monthly: plan.price_monthly,
        price_yearly: plan.price_yearly,
        features,
        max_ai_messages: plan.max_ai_messages,
        max_recipe_saves: plan.max_recipe_saves,
        has_price_alerts: plan.has_price_alerts,
        has_meal_planning: plan.has_meal_planning,
        has_pdf_export: plan.has_pdf_export,
        has_exclusive_recipes: plan.has_exclusive_recipes,
    })
}

/// All plans, cheapest first.
pub async fn list_plans(pool: &PgPool) -> Res<Vec<PlanResponse>> {
    db::plan::get_all_plans(pool)
        .await?
        .into_iter()
        .map(to_plan_response)
        .collect()
}

/// Checkout and portal sessions for users moving between paid tiers.
pub struct SubscriptionService<P, B>
where
    P: PlanRepository + 'static,
    B: BillingGateway + 'static,
{
    plans: Arc<P>,
    gateway: Arc<B>,
    app_url: String,
}

impl<P, B> SubscriptionService<P, B>
where
    P: PlanRepository + 'static,
    B: BillingGateway + 'static,
{
    pub fn new(plans: Arc<P>, gateway: Arc<B>, app_url: &str) -> Self {
        Self {
            plans,
            gateway,
            app_url: app_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn current(&self, user: &User) -> Res<CurrentSubscriptionResponse> {
        let tier = user.tier();
        let plan = self
            .plans
            .find_by_tier(tier)
            .await?
            .map(to_plan_response)
            .transpose()?;

        Ok(CurrentSubscriptionResponse {
            tier,
            status: user.subscription_status.clone(),
            ends_at: user.subscription_ends_at,
            plan,
        })
    }

    /// Opens a Stripe checkout for a paid tier. The user's tier is left untouched.
    pub async fn create_checkout(
        &self,
        user: &User,
        plan_tier: Tier,
        period: BillingPeriod,
    ) -> Res<String> {
        if plan_tier == Tier::Free {
            return Err(AppError::BadRequest(
                "The free plan does not need a checkout".to_string(),
            ));
        }

        let plan = self
            .plans
            .find_by_tier(plan_tier)
            .await?
            .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

        let price_id = plan.price_id_for(period).ok_or_else(|| {
            AppError::Config(format!(
                "Stripe price ID not configured for the {} plan",
                plan_tier
            ))
        })?;

        self.gateway
            .create_checkout_session(CheckoutSpec {
                user_id: user.id,
                price_id: price_id.to_string(),
                customer_id: user.stripe_customer_id.clone(),
                customer_email: user.email.clone(),
                success_url: format!("{}/subscription/success", self.app_url),
                cancel_url: format!("{}/pricing", self.app_url),
            })
            .await
    }

    pub async fn create_portal(&self, user: &User) -> Res<String> {
        let customer_id = user
            .stripe_customer_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("No active subscription found".to_string()))?;

        self.gateway
            .create_portal_session(
                customer_id.to_string(),
                format!("{}/subscription", self.app_url),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use limiter::repository::MockPlanRepository;
    use mockall::predicate::eq;
    use uuid::Uuid;

    use super::*;
    use crate::services::billing::MockBillingGateway;

    const APP_URL: &str = "https://kitchenspark.test/";

    fn user(stripe_customer_id: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "cook@example.com".to_string(),
            name: Some("Sam".to_string()),
            login_method: Some("password".to_string()),
            role: "user".to_string(),
            subscription_tier: "free".to_string(),
            stripe_customer_id: stripe_customer_id.map(str::to_string),
            subscription_status: None,
            subscription_ends_at: None,
            created_at: now,
            updated_at: now,
            last_signed_in: now,
        }
    }

    fn plan(tier: Tier, monthly_price_id: Option<&str>) -> SubscriptionPlan {
        let now = Utc::now();
        SubscriptionPlan {
            id: 2,
            name: "Premium".to_string(),
            tier: tier.to_string(),
            price_monthly: 999,
            price_yearly: 9999,
            stripe_price_id_monthly: monthly_price_id.map(str::to_string),
            stripe_price_id_yearly: None,
            features: r#"["Unlimited recipe saves","Price alerts"]"#.to_string(),
            max_ai_messages: 200,
            max_recipe_saves: 0,
            has_price_alerts: true,
            has_meal_planning: false,
            has_pdf_export: true,
            has_exclusive_recipes: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn plans_returning(plan: Option<SubscriptionPlan>) -> MockPlanRepository {
        let mut plans = MockPlanRepository::new();
        plans
            .expect_find_by_tier()
            .returning(move |_| Ok(plan.clone()));
        plans
    }

    #[tokio::test]
    async fn missing_price_id_fails_without_calling_stripe() {
        let mut gateway = MockBillingGateway::new();
        gateway.expect_create_checkout_session().times(0);

        let service = SubscriptionService::new(
            Arc::new(plans_returning(Some(plan(Tier::Premium, Some("  "))))),
            Arc::new(gateway),
            APP_URL,
        );

        let err = service
            .create_checkout(&user(None), Tier::Premium, BillingPeriod::Monthly)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = service
            .create_checkout(&user(None), Tier::Premium, BillingPeriod::Yearly)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn free_tier_checkout_is_a_bad_request() {
        let service = SubscriptionService::new(
            Arc::new(MockPlanRepository::new()),
            Arc::new(MockBillingGateway::new()),
            APP_URL,
        );

        let err = service
            .create_checkout(&user(None), Tier::Free, BillingPeriod::Monthly)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let service = SubscriptionService::new(
            Arc::new(plans_returning(None)),
            Arc::new(MockBillingGateway::new()),
            APP_URL,
        );

        let err = service
            .create_checkout(&user(None), Tier::Pro, BillingPeriod::Monthly)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(message) if message == "Plan not found"));
    }

    #[tokio::test]
    async fn checkout_uses_email_when_user_has_no_customer() {
        let buyer = user(None);
        let expected = CheckoutSpec {
            user_id: buyer.id,
            price_id: "price_premium_monthly".to_string(),
            customer_id: None,
            customer_email: "cook@example.com".to_string(),
            success_url: "https://kitchenspark.test/subscription/success".to_string(),
            cancel_url: "https://kitchenspark.test/pricing".to_string(),
        };

        let mut gateway = MockBillingGateway::new();
        gateway
            .expect_create_checkout_session()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok("https://checkout.stripe.test/c/pay_1".to_string()));

        let service = SubscriptionService::new(
            Arc::new(plans_returning(Some(plan(
                Tier::Premium,
                Some("price_premium_monthly"),
            )))),
            Arc::new(gateway),
            APP_URL,
        );

        let url = service
            .create_checkout(&buyer, Tier::Premium, BillingPeriod::Monthly)
            .await
            .unwrap();
        assert_eq!(url, "https://checkout.stripe.test/c/pay_1");
    }

    #[tokio::test]
    async fn portal_requires_a_stripe_customer() {
        let mut gateway = MockBillingGateway::new();
        gateway
            .expect_create_portal_session()
            .with(
                eq("cus_42".to_string()),
                eq("https://kitchenspark.test/subscription".to_string()),
            )
            .times(1)
            .returning(|_, _| Ok("https://billing.stripe.test/p/session".to_string()));

        let service = SubscriptionService::new(
            Arc::new(MockPlanRepository::new()),
            Arc::new(gateway),
            APP_URL,
        );

        let err = service.create_portal(&user(None)).await.unwrap_err();
        assert!(
            matches!(err, AppError::BadRequest(message) if message == "No active subscription found")
        );

        let url = service.create_portal(&user(Some("cus_42"))).await.unwrap();
        assert_eq!(url, "https://billing.stripe.test/p/session");
    }

    #[tokio::test]
    async fn current_reports_tier_and_decoded_plan() {
        let service = SubscriptionService::new(
            Arc::new(plans_returning(Some(plan(Tier::Free, None)))),
            Arc::new(MockBillingGateway::new()),
            APP_URL,
        );

        let current = service.current(&user(None)).await.unwrap();
        assert_eq!(current.tier, Tier::Free);
        assert_eq!(
            current.plan.unwrap().features,
            vec!["Unlimited recipe saves", "Price alerts"]
        );
    }
}
