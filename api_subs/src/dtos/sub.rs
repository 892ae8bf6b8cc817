use chrono::{DateTime, Utc};
use common::misc::{BillingPeriod, Tier};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub plan_tier: Tier,
    pub billing_period: BillingPeriod,
}

#[derive(Debug, Serialize)]
pub struct SessionUrlResponse {
    pub url: String,
}

/// Plan as shown on the pricing page, with its marketing lines decoded.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub id: i32,
    pub name: String,
    pub tier: String,
    pub price_monthly: i32,
    pub price_yearly: i32,
    pub features: Vec<String>,
    pub max_ai_messages: i32,
    pub max_recipe_saves: i32,
    pub has_price_alerts: bool,
    pub has_meal_planning: bool,
    pub has_pdf_export: bool,
    pub has_exclusive_recipes: bool,
}

#[derive(Debug, Serialize)]
pub struct CurrentSubscriptionResponse {
    pub tier: Tier,
    pub status: Option<String>,
    pub ends_at: Option<DateTime<Utc>>,
    pub plan: Option<PlanResponse>,
}
