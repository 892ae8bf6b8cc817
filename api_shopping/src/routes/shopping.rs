use std::sync::Arc;

use actix_web::{Responder, delete, get, post, web};
use common::{
    error::Res,
    http::{Done, Success},
    jwt::JwtClaims,
};
use sqlx::PgPool;

use crate::{
    dtos::shopping::{AddItemRequest, ToggleItemRequest},
    services::shopping::{self, PgShoppingList},
};

/// Lists the caller's shopping list, newest first.
///
/// # Frontend Example
/// ```javascript
/// const items = await (await fetch('/api/account/shopping', {
///   headers: { 'Authorization': `Bearer ${localStorage.getItem('authToken')}` }
/// })).json();
/// ```
#[get("")]
pub async fn get_list(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgShoppingList::new(pool.get_ref().clone());
    let items = shopping::list_items(&repo, claims.user_id).await?;
    Success::ok(items)
}

/// Adds an item.
///
/// # Input
/// - `{ "name": "Milk", "quantity": "2L", "category": "Dairy", "recipe_id": 3 }`
///   where everything but `name` is optional
///
/// # Output
/// - Success: 201 with the created item
/// - Error: 400 when `name` is blank
#[post("")]
pub async fn post_add(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<AddItemRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgShoppingList::new(pool.get_ref().clone());
    let item = shopping::add_item(&repo, claims.user_id, req.into_inner()).await?;
    Success::created(item)
}

/// Marks an item as bought or not.
///
/// # Input
/// - `{ "id": 7, "completed": true }`
///
/// # Output
/// - Success: the updated item
/// - Error: 404 when the item is not on the caller's list
#[post("/toggle")]
pub async fn post_toggle(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<ToggleItemRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgShoppingList::new(pool.get_ref().clone());
    let item = shopping::toggle_item(&repo, claims.user_id, req.id, req.completed).await?;
    Success::ok(item)
}

/// Removes every completed item.
#[post("/clear-completed")]
pub async fn post_clear_completed(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgShoppingList::new(pool.get_ref().clone());
    shopping::clear_completed(&repo, claims.user_id).await?;
    Success::ok(Done::new())
}

/// Removes one item. 404 when it is not on the caller's list.
#[delete("/{id}")]
pub async fn delete_item(
    claims: web::ReqData<JwtClaims>,
    path: web::Path<i64>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let repo = PgShoppingList::new(pool.get_ref().clone());
    shopping::delete_item(&repo, claims.user_id, path.into_inner()).await?;
    Success::ok(Done::new())
}
