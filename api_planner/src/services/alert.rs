use std::sync::Arc;

use common::{
    error::{AppError, Res},
    misc::Feature,
};
use db::{
    dtos::alert::PriceAlertCreateRequest,
    models::{alert::PriceAlert, user::User},
};
use limiter::entitlements::Entitlements;
use sqlx::PgPool;

use crate::dtos::planner::CreateAlertRequest;

/// Longest product name accepted for an alert.
const MAX_PRODUCT_NAME_LEN: usize = 200;

pub fn validate_alert(user: &User, req: CreateAlertRequest) -> Res<PriceAlertCreateRequest> {
    let product_name = req.product_name.trim();
    if product_name.is_empty() {
        return Err(AppError::BadRequest("Product name is required".to_string()));
    }
    if product_name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Product name must be at most {} characters",
            MAX_PRODUCT_NAME_LEN
        )));
    }
    if req.target_price <= 0 {
        return Err(AppError::BadRequest(
            "Target price must be greater than zero".to_string(),
        ));
    }

    Ok(PriceAlertCreateRequest {
        user_id: user.id,
        product_name: product_name.to_string(),
        target_price: req.target_price,
    })
}

/// Active alerts, newest first. Requires a plan with price alerts.
pub async fn list_alerts(pool: &Arc<PgPool>, user: &User) -> Res<Vec<PriceAlert>> {
    Entitlements::from_pool(pool.clone())
        .require_feature(user.tier(), Feature::PriceAlerts)
        .await?;
    db::alert::get_active_alerts(pool.as_ref(), user.id).await
}

pub async fn create_alert(
    pool: &Arc<PgPool>,
    user: &User,
    req: CreateAlertRequest,
) -> Res<PriceAlert> {
    Entitlements::from_pool(pool.clone())
        .require_feature(user.tier(), Feature::PriceAlerts)
        .await?;
    let data = validate_alert(user, req)?;
    let alert = db::alert::insert_alert(pool.as_ref(), data).await?;
    log::info!("Price alert {} created for user {}", alert.id, user.id);
    Ok(alert)
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    pub(crate) fn user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "cook@example.com".to_string(),
            name: None,
            login_method: Some("password".to_string()),
            role: "user".to_string(),
            subscription_tier: "premium".to_string(),
            stripe_customer_id: None,
            subscription_status: None,
            subscription_ends_at: None,
            created_at: now,
            updated_at: now,
            last_signed_in: now,
        }
    }

    fn request(product_name: &str, target_price: i32) -> CreateAlertRequest {
        CreateAlertRequest {
            product_name: product_name.to_string(),
            target_price,
        }
    }

    #[test]
    fn alert_needs_a_positive_target_price() {
        let err = validate_alert(&user(), request("Butter 500g", 0)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(validate_alert(&user(), request("Butter 500g", -5)).is_err());
    }

    #[test]
    fn alert_needs_a_product_name() {
        let err = validate_alert(&user(), request("   ", 450)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(validate_alert(&user(), request(&"x".repeat(201), 450)).is_err());
    }

    #[test]
    fn valid_alert_is_trimmed_and_owned_by_the_user() {
        let owner = user();
        let data = validate_alert(&owner, request(" Butter 500g ", 450)).unwrap();
        assert_eq!(data.user_id, owner.id);
        assert_eq!(data.product_name, "Butter 500g");
        assert_eq!(data.target_price, 450);
    }
}
