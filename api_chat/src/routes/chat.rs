use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use limiter::entitlements::Entitlements;
use sqlx::PgPool;

use crate::{
    dtos::chat::{SendMessageRequest, SendMessageResponse},
    services::{
        chat::{ChatService, PgChatStore},
        llm::OpenAiClient,
    },
};

/// The caller's conversation, oldest first, up to 100 messages.
///
/// # Frontend Example
/// ```javascript
/// const history = await (await fetch('/api/account/chat/history', {
///   headers: { 'Authorization': `Bearer ${localStorage.getItem('authToken')}` }
/// })).json();
/// // [{ id: 1, role: "user", content: "...", created_at: "..." }, ...]
/// ```
#[get("/history")]
pub async fn get_history(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    client: web::Data<OpenAiClient>,
) -> Res<impl Responder> {
    let service = ChatService::new(
        Arc::new(PgChatStore::new(pool.get_ref().clone())),
        client.into_inner(),
    );
    let history = service.history(claims.user_id).await?;
    Success::ok(history)
}

/// Sends a message to Kitchen Spark AI and returns its reply.
///
/// # Input
/// - `{ "message": "What can I cook with leftover rice?" }`
///
/// # Output
/// - Success: `{ "message": "..." }`
/// - Error: 400 for an empty message, 500 when the completion endpoint fails.
///   The user's message is kept in the history either way.
#[post("/send")]
pub async fn post_send(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<SendMessageRequest>,
    pool: web::Data<Arc<PgPool>>,
    client: web::Data<OpenAiClient>,
) -> Res<impl Responder> {
    let pool = pool.get_ref().clone();
    let service = ChatService::new(Arc::new(PgChatStore::new(pool.clone())), client.into_inner());
    let entitlements = Entitlements::from_pool(pool);

    let message = service
        .send(claims.user_id, &req.message, &entitlements)
        .await?;
    Success::ok(SendMessageResponse { message })
}
