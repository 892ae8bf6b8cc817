use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{
    env_config::Config,
    error::Res,
    http::Success,
    jwt::JwtClaims,
    misc::Feature,
};
use limiter::{entitlements::Entitlements, pg::PgEntitlementStore};
use sqlx::PgPool;

use crate::{
    dtos::sub::{CheckoutRequest, SessionUrlResponse},
    services::{billing::StripeGateway, sub::SubscriptionService},
};

type StripeSubscriptions = SubscriptionService<PgEntitlementStore, StripeGateway>;

fn subscription_service(pool: &Arc<PgPool>, config: &Config) -> StripeSubscriptions {
    SubscriptionService::new(
        Arc::new(PgEntitlementStore::new(pool.clone())),
        Arc::new(StripeGateway::new(&config.stripe_secret_key)),
        &config.app_url,
    )
}

/// Lists all subscription plans, cheapest first.
///
/// # Output
/// - Success: array of plans with `features` decoded into a list of strings
///
/// # Frontend Example
/// ```javascript
/// const plans = await (await fetch('/api/sub/plans')).json();
/// // [{ tier: "free", price_monthly: 0, features: ["..."], max_ai_messages: 20, ... }, ...]
/// ```
#[get("/plans")]
pub async fn get_plans(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let plans = crate::services::sub::list_plans(&pool).await?;
    Success::ok(plans)
}

/// Gets the caller's tier, Stripe status, end date and plan.
///
/// # Frontend Example
/// ```javascript
/// const current = await (await fetch('/api/account/sub/current', {
///   headers: { 'Authorization': `Bearer ${localStorage.getItem('authToken')}` }
/// })).json();
/// // { tier: "free", status: null, ends_at: null, plan: { ... } }
/// ```
#[get("/current")]
pub async fn get_current(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let current = subscription_service(&pool, &config).current(&user).await?;
    Success::ok(current)
}

/// Creates a Stripe checkout session for a paid plan.
///
/// # Input
/// - `{ "plan_tier": "premium" | "pro", "billing_period": "monthly" | "yearly" }`
///
/// # Output
/// - Success: `{ "url": "https://checkout.stripe.com/..." }`
/// - Error: 400 for the free plan, 404 for an unknown plan,
///   500 when the plan has no Stripe price for the period
///
/// # Frontend Example
/// ```javascript
/// const { url } = await (await fetch('/api/account/sub/checkout', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({ plan_tier: 'premium', billing_period: 'monthly' })
/// })).json();
/// window.location.href = url;
/// ```
#[post("/checkout")]
pub async fn post_checkout(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CheckoutRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let url = subscription_service(&pool, &config)
        .create_checkout(&user, req.plan_tier, req.billing_period)
        .await?;
    Success::ok(SessionUrlResponse { url })
}

/// Creates a Stripe billing portal session.
///
/// # Output
/// - Success: `{ "url": "https://billing.stripe.com/..." }`
/// - Error: 400 "No active subscription found" when the caller never paid
#[post("/portal")]
pub async fn post_portal(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let url = subscription_service(&pool, &config)
        .create_portal(&user)
        .await?;
    Success::ok(SessionUrlResponse { url })
}

/// `true` when the caller's plan includes the feature.
/// Feature is one of `priceAlerts`, `mealPlanning`, `pdfExport`, `exclusiveRecipes`.
#[get("/access/{feature}")]
pub async fn get_can_access(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<String>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let feature: Feature = path.parse()?;
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let allowed = Entitlements::from_pool(pool.get_ref().clone())
        .can_access(user.tier(), feature)
        .await?;
    Success::ok(allowed)
}

/// AI messages used this month against the plan's allowance.
///
/// # Output
/// - `{ "limit": 20, "used": 3, "unlimited": false }`
#[get("/ai-usage")]
pub async fn get_ai_usage(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let usage = Entitlements::from_pool(pool.get_ref().clone())
        .current_ai_usage(user.id, user.tier())
        .await?;
    Success::ok(usage)
}

/// Billing history of the caller, newest first.
#[get("/transactions")]
pub async fn get_transactions(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let transactions =
        db::transaction::get_transactions_by_user_id(pool.get_ref().as_ref(), claims.user_id)
            .await?;
    Success::ok(transactions)
}
