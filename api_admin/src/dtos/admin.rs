use db::models::{transaction::RevenueTotal, user::User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct TierBreakdown {
    pub free: i64,
    pub premium: i64,
    pub pro: i64,
}

#[derive(Debug, Serialize)]
pub struct RevenueReport {
    pub totals: Vec<RevenueTotal>,
    pub subscriptions: TierBreakdown,
}
