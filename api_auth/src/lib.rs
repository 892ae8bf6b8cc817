use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    cookie::{Key, SameSite},
    web,
};
use middleware::auth::AuthMiddleware;

pub mod routes {
    pub mod auth;
}

pub mod middleware {
    pub mod auth;
}

mod services {
    pub(crate) mod auth;
    pub(crate) mod validate;
}

mod dtos {
    pub(crate) mod auth;
}

pub const SESSION_COOKIE_NAME: &str = "kitchen_spark_session";

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::post_login)
        .service(routes::auth::get_me)
        .service(routes::auth::post_logout)
}

/// Account management for signed-in users. Mount behind `auth_middleware`.
pub fn mount_account() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::put_profile)
        .service(routes::auth::post_change_password)
}

/// Rejects requests without valid claims. Wrap protected scopes with it.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}

/// Signed cookie session. The key is derived from the JWT secret, which must be at least 32 bytes.
pub fn session_middleware(
    cookie_secure: bool,
    is_production: bool,
    secret: &[u8],
) -> SessionMiddleware<CookieSessionStore> {
    let same_site = if is_production {
        SameSite::None
    } else {
        SameSite::Lax
    };
    SessionMiddleware::builder(CookieSessionStore::default(), Key::derive_from(secret))
        .cookie_name(SESSION_COOKIE_NAME.to_string())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build()
}
