use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::{dtos::admin::PageQuery, services};

/// A page of users, newest first. Admins only.
///
/// # Input
/// - `limit`: page size, 1 to 100, defaults to 50
/// - `offset`: rows to skip, defaults to 0
///
/// # Output
/// - Success: `{ users: [...], limit, offset }`
/// - Error: 401 for non-admins
#[get("/users")]
pub async fn get_users(
    claims: web::ReqData<JwtClaims>,
    query: web::Query<PageQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let page = services::admin::users_page(pg_pool, claims.user_id, &query).await?;
    Success::ok(page)
}

/// Revenue from succeeded payments per currency and user counts per tier. Admins only.
///
/// # Output
/// - `{ totals: [{ currency: "NZD", total_cents: 19980, transaction_count: 2 }], subscriptions: { free: 12, premium: 4, pro: 1 } }`
#[get("/revenue")]
pub async fn get_revenue(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let report = services::admin::revenue(pg_pool, claims.user_id).await?;
    Success::ok(report)
}
