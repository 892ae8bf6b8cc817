use chrono::{DateTime, Utc};
use common::misc::{Role, Tier};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub login_method: Option<String>,
    pub role: String,
    pub subscription_tier: String,
    pub stripe_customer_id: Option<String>,
    pub subscription_status: Option<String>,
    pub subscription_ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

impl User {
    /// Tier column is constrained by the schema, anything unexpected falls back to free.
    pub fn tier(&self) -> Tier {
        self.subscription_tier.parse().unwrap_or(Tier::Free)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.as_str()
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AuthCredentials {
    pub user_id: Uuid,
    pub password_hash: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserWithPasswordHash {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}
