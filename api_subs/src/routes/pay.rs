use std::sync::Arc;

use actix_web::{HttpRequest, Responder, post, web};
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::Success,
};

use crate::services;

/// Handles Stripe webhook events.
///
/// # Input
/// - `payload`: Raw string containing the webhook event data
/// - `req`: HTTP request carrying the `stripe-signature` header
/// - `config`: Application configuration with the webhook secret
///
/// # Output
/// - Success: 200 OK once the signature is verified and the event is logged
/// - Error: 400 for a missing or invalid signature
///
/// # Note
/// Called by Stripe, not by the web app. Configure
/// `https://yourapp.com/api/pay/webhook` in the Stripe Dashboard and set the
/// signing secret as `STRIPE_WEBHOOK_SECRET`.
/// Events are only logged. Subscription tiers are not updated from here.
#[post("/webhook")]
pub async fn post_webhook(
    payload: String,
    req: HttpRequest,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let signature = match req.headers().get("stripe-signature") {
        Some(signature) => signature.to_str().unwrap_or(""),
        None => return Err(AppError::BadRequest("Stripe signature missing".to_string())),
    };

    let event =
        services::pay::construct_event(&payload, signature, &config.stripe_webhook_secret)?;
    services::pay::process_webhook_event(event)?;

    Success::ok("Webhook processed successfully")
}
