use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: Uuid,
    pub stripe_payment_id: String,
    pub amount: i32,
    pub currency: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct RevenueTotal {
    pub currency: String,
    pub total_cents: i64,
    pub transaction_count: i64,
}
