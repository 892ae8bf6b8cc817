use async_trait::async_trait;
use common::{
    error::{AppError, Res},
    stripe::create_client,
};
use mockall::automock;
use stripe::{
    BillingPortalSession, CheckoutSession, CheckoutSessionMode, CreateBillingPortalSession,
    CreateCheckoutSession, CreateCheckoutSessionLineItems, CreateCheckoutSessionPaymentMethodTypes,
    CreateCheckoutSessionSubscriptionData, CustomerId, Metadata,
};
use uuid::Uuid;

/// Everything needed to open a subscription checkout for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSpec {
    pub user_id: Uuid,
    pub price_id: String,
    /// Existing Stripe customer. When absent Stripe creates one from `customer_email`.
    pub customer_id: Option<String>,
    pub customer_email: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[automock]
#[async_trait]
pub trait BillingGateway: Send + Sync {
    /// Returns the hosted checkout URL.
    async fn create_checkout_session(&self, spec: CheckoutSpec) -> Res<String>;
    /// Returns the billing portal URL.
    async fn create_portal_session(&self, customer_id: String, return_url: String) -> Res<String>;
}

pub struct StripeGateway {
    secret_key: String,
}

impl StripeGateway {
    pub fn new(secret_key: &str) -> Self {
        Self {
            secret_key: secret_key.to_string(),
        }
    }
}

fn parse_customer_id(customer_id: &str) -> Res<CustomerId> {
    customer_id.parse::<CustomerId>().map_err(|e| {
        AppError::Internal(format!(
            "Failed to parse customer id: {}. {}",
            customer_id, e
        ))
    })
}

#[async_trait]
impl BillingGateway for StripeGateway {
    async fn create_checkout_session(&self, spec: CheckoutSpec) -> Res<String> {
        let client = create_client(&self.secret_key)?;

        let mut metadata = Metadata::new();
        metadata.insert("user_id".to_string(), spec.user_id.to_string());

        let customer = spec
            .customer_id
            .as_deref()
            .map(parse_customer_id)
            .transpose()?;
        let customer_email = match customer {
            Some(_) => None,
            None => Some(spec.customer_email.as_str()),
        };

        let params = CreateCheckoutSession {
            payment_method_types: Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]),
            line_items: Some(vec![CreateCheckoutSessionLineItems {
                price: Some(spec.price_id.clone()),
                quantity: Some(1),
                ..Default::default()
            }]),
            mode: Some(CheckoutSessionMode::Subscription),
            success_url: Some(spec.success_url.as_str()),
            cancel_url: Some(spec.cancel_url.as_str()),
            customer,
            customer_email,
            metadata: Some(metadata.clone()),
            subscription_data: Some(CreateCheckoutSessionSubscriptionData {
                metadata: Some(metadata),
                ..Default::default()
            }),
            ..Default::default()
        };

        let session = CheckoutSession::create(&client, params).await?;
        log::info!("Checkout session {} created for user {}", session.id, spec.user_id);
        session
            .url
            .ok_or_else(|| AppError::Internal("Checkout session has no URL".to_string()))
    }

    async fn create_portal_session(&self, customer_id: String, return_url: String) -> Res<String> {
        let client = create_client(&self.secret_key)?;

        let mut params = CreateBillingPortalSession::new(parse_customer_id(&customer_id)?);
        params.return_url = Some(return_url.as_str());

        let session = BillingPortalSession::create(&client, params).await?;
        Ok(session.url)
    }
}
