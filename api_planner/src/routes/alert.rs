use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::{dtos::planner::CreateAlertRequest, services};

/// Lists the caller's active price alerts.
///
/// # Output
/// - Success: array of alerts, newest first
/// - Error: 403 when the caller's plan has no price alerts
#[get("")]
pub async fn get_alerts(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let alerts = services::alert::list_alerts(pool.get_ref(), &user).await?;
    Success::ok(alerts)
}

/// Creates a price alert.
///
/// # Input
/// - `{ "product_name": "Butter 500g", "target_price": 450 }` with the price in cents
///
/// # Output
/// - Success: 201 with the created alert
/// - Error: 400 for a blank name or non-positive price, 403 without price alerts
///
/// # Frontend Example
/// ```javascript
/// await fetch('/api/account/alerts', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json',
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   },
///   body: JSON.stringify({ product_name: 'Butter 500g', target_price: 450 })
/// });
/// ```
#[post("")]
pub async fn post_alert(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CreateAlertRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let user = db::user::get_user_by_id(pool.get_ref().as_ref(), claims.user_id).await?;
    let alert = services::alert::create_alert(pool.get_ref(), &user, req.into_inner()).await?;
    Success::created(alert)
}
