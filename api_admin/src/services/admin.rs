use common::{
    error::{AppError, Res},
    misc::Tier,
};
use db::models::{tier::TierCount, user::User};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::admin::{PageQuery, RevenueReport, TierBreakdown, UsersPage};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Role is read from the database, not from the token.
pub fn require_admin(user: &User) -> Res<()> {
    if user.is_admin() {
        Ok(())
    } else {
        log::warn!("User {} tried to open an admin report", user.id);
        Err(AppError::Unauthorized("Unauthorized".to_string()))
    }
}

pub fn clamp_page(query: &PageQuery) -> (i64, i64) {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);
    (limit, offset)
}

pub fn tier_breakdown(counts: &[TierCount]) -> TierBreakdown {
    counts
        .iter()
        .fold(TierBreakdown::default(), |mut breakdown, count| {
            match count.tier.parse::<Tier>() {
                Ok(Tier::Free) => breakdown.free += count.users,
                Ok(Tier::Premium) => breakdown.premium += count.users,
                Ok(Tier::Pro) => breakdown.pro += count.users,
                Err(_) => log::warn!("Ignoring users with unknown tier '{}'", count.tier),
            }
            breakdown
        })
}

async fn load_admin(pool: &PgPool, user_id: Uuid) -> Res<()> {
    let user = db::user::get_user_by_id(pool, user_id).await?;
    require_admin(&user)
}

pub async fn users_page(pool: &PgPool, user_id: Uuid, query: &PageQuery) -> Res<UsersPage> {
    load_admin(pool, user_id).await?;
    let (limit, offset) = clamp_page(query);
    let users = db::user::get_users_page(pool, limit, offset).await?;
    Ok(UsersPage {
        users,
        limit,
        offset,
    })
}

pub async fn revenue(pool: &PgPool, user_id: Uuid) -> Res<RevenueReport> {
    load_admin(pool, user_id).await?;
    let totals = db::transaction::get_revenue_totals(pool).await?;
    let counts = db::tier::count_users_per_tier(pool).await?;
    Ok(RevenueReport {
        totals,
        subscriptions: tier_breakdown(&counts),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(role: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "owner@example.com".to_string(),
            name: None,
            login_method: Some("password".to_string()),
            role: role.to_string(),
            subscription_tier: "pro".to_string(),
            stripe_customer_id: None,
            subscription_status: None,
            subscription_ends_at: None,
            created_at: now,
            updated_at: now,
            last_signed_in: now,
        }
    }

    #[test]
    fn only_admins_pass() {
        assert!(require_admin(&user("admin")).is_ok());
        let err = require_admin(&user("user")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn page_bounds_are_clamped() {
        let page = |limit, offset| clamp_page(&PageQuery { limit, offset });
        assert_eq!(page(None, None), (DEFAULT_PAGE_SIZE, 0));
        assert_eq!(page(Some(1000), Some(-3)), (MAX_PAGE_SIZE, 0));
        assert_eq!(page(Some(0), Some(20)), (1, 20));
    }

    #[test]
    fn tier_counts_fill_the_breakdown() {
        let counts = vec![
            TierCount {
                tier: "free".to_string(),
                users: 12,
            },
            TierCount {
                tier: "pro".to_string(),
                users: 3,
            },
            TierCount {
                tier: "gold".to_string(),
                users: 1,
            },
        ];
        assert_eq!(
            tier_breakdown(&counts),
            TierBreakdown {
                free: 12,
                premium: 0,
                pro: 3,
            }
        );
    }
}
