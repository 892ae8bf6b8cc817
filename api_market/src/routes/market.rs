use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success};
use sqlx::PgPool;

use crate::{
    dtos::market::{CountryQuery, ProductSearchQuery},
    services,
};

/// Products whose name or category contains `query`, at most 50.
///
/// # Frontend Example
/// ```javascript
/// const products = await (await fetch('/api/supermarket/search?query=milk&country=NZ')).json();
/// ```
#[get("/search")]
pub async fn get_search(
    query: web::Query<ProductSearchQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let products = services::market::search(&pool, &query.query, &query.country).await?;
    Success::ok(products)
}

/// Same matching as search, grouped per product with offers cheapest first.
///
/// # Output
/// - `[{ "name": "Milk 2L", "offers": [{ "supermarket": "Pak'nSave", "price": 399, "unit": "2L" }], "spread": 80 }]`
#[get("/compare")]
pub async fn get_compare(
    query: web::Query<ProductSearchQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let comparisons = services::market::compare(&pool, &query.query, &query.country).await?;
    Success::ok(comparisons)
}

/// Everything one supermarket sells in the country.
#[get("/store/{supermarket}")]
pub async fn get_by_supermarket(
    path: web::Path<String>,
    query: web::Query<CountryQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let products = services::market::by_supermarket(&pool, &path, &query.country).await?;
    Success::ok(products)
}
