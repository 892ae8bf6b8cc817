use common::error::{AppError, Res};
use stripe::{Event, EventObject, EventType, Webhook};

/// Creates an event for the webhook based on the request payload and signature.
/// Requires a webhook secret key.
pub fn construct_event(payload: &str, signature: &str, webhook_secret: &str) -> Res<Event> {
    if webhook_secret.trim().is_empty() {
        return Err(AppError::Config(
            "STRIPE_WEBHOOK_SECRET is not configured".to_string(),
        ));
    }

    match Webhook::construct_event(payload, signature, webhook_secret) {
        Ok(event) => Ok(event),
        Err(e) => {
            log::error!("Error constructing webhook event: {}", e);
            Err(AppError::BadRequest(format!("Webhook Error: {}", e)))
        }
    }
}

/// Logs the event. Tiers are not changed here.
pub fn process_webhook_event(event: Event) -> Res<()> {
    log::info!("Processing webhook event: {}", event.type_);

    match event.type_ {
        EventType::CheckoutSessionCompleted => {
            if let EventObject::CheckoutSession(session) = event.data.object {
                let user_id = session
                    .metadata
                    .as_ref()
                    .and_then(|metadata| metadata.get("user_id"))
                    .map(String::as_str)
                    .unwrap_or("unknown");
                log::info!(
                    "Checkout session completed: {} (user {})",
                    session.id,
                    user_id
                );
            }
        }
        EventType::CustomerSubscriptionCreated => {
            if let EventObject::Subscription(subscription) = event.data.object {
                log::info!("Subscription created: {}", subscription.id);
            }
        }
        EventType::CustomerSubscriptionUpdated => {
            if let EventObject::Subscription(subscription) = event.data.object {
                log::info!("Subscription updated: {}", subscription.id);
            }
        }
        EventType::CustomerSubscriptionDeleted => {
            if let EventObject::Subscription(subscription) = event.data.object {
                log::info!("Subscription deleted: {}", subscription.id);
            }
        }
        EventType::InvoicePaymentFailed => {
            if let EventObject::Invoice(invoice) = event.data.object {
                log::warn!("Invoice payment failed: {}", invoice.id);
            }
        }
        _ => {
            log::info!("Unhandled event type: {}", event.type_);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_payload_is_rejected() {
        let err = construct_event("{}", "t=1,v1=deadbeef", "whsec_test").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn missing_webhook_secret_is_a_config_error() {
        let err = construct_event("{}", "t=1,v1=deadbeef", "").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
