use chrono::{DateTime, Utc};
use common::misc::{BillingPeriod, Feature};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SubscriptionPlan {
    pub id: i32,
    pub name: String,
    pub tier: String,
    /// Cents
    pub price_monthly: i32,
    /// Cents
    pub price_yearly: i32,
    pub stripe_price_id_monthly: Option<String>,
    pub stripe_price_id_yearly: Option<String>,
    /// JSON array of marketing lines
    pub features: String,
    /// 0 means unlimited
    pub max_ai_messages: i32,
    /// 0 means unlimited
    pub max_recipe_saves: i32,
    pub has_price_alerts: bool,
    pub has_meal_planning: bool,
    pub has_pdf_export: bool,
    pub has_exclusive_recipes: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionPlan {
    pub fn has_feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::PriceAlerts => self.has_price_alerts,
            Feature::MealPlanning => self.has_meal_planning,
            Feature::PdfExport => self.has_pdf_export,
            Feature::ExclusiveRecipes => self.has_exclusive_recipes,
        }
    }

    /// Stripe price id for the billing period, `None` when unset or blank.
    pub fn price_id_for(&self, period: BillingPeriod) -> Option<&str> {
        let price_id = match period {
            BillingPeriod::Monthly => self.stripe_price_id_monthly.as_deref(),
            BillingPeriod::Yearly => self.stripe_price_id_yearly.as_deref(),
        };
        price_id.map(str::trim).filter(|id| !id.is_empty())
    }
}
