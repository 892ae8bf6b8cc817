use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct TierCount {
    pub tier: String,
    pub users: i64,
}
