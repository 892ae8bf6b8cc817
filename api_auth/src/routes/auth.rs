use std::sync::Arc;

use actix_session::Session;
use actix_web::{HttpRequest, Responder, get, post, put, web};
use common::{
    env_config::Config,
    error::{AppError, Res},
    http::{Done, Success},
    jwt::{self, ClaimsSpec, JwtClaims, SESSION_TOKEN_KEY},
};
use db::models::user::User;
use sqlx::PgPool;

use crate::{
    dtos::auth::{
        AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
    },
    services,
};

/// Registers a new user with email and password authentication.
///
/// # Input
/// - `req`: JSON payload with `email`, `password` and an optional display `name`
/// - `pool`: Database connection pool
/// - `config`: Application configuration
///
/// # Output
/// - Success: Returns the created user object with 201 Created status
/// - Error: 400 for a malformed email or weak password, 409 if the email is taken
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/register', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     email: 'cook@example.com',
///     password: 'Tomato5oup',
///     name: 'Sam Cook' // Optional
///   })
/// });
/// ```
#[post("/register")]
pub async fn post_register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let user = services::auth::register_user(pg_pool, req.into_inner(), &config).await?;
    Success::created(user)
}

/// Authenticates a user with email and password.
/// The issued token is returned and also kept in the session cookie.
///
/// # Input
/// - `login_data`: JSON payload containing email and password
/// - `config`: Application configuration for JWT generation
/// - `pool`: Database connection pool
/// - `session`: Cookie session that stores the token for browser clients
///
/// # Output
/// - Success: Returns `{ token, user }`
/// - Error: Returns 401 Unauthorized for invalid credentials
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/login', {
///   method: 'POST',
///   credentials: 'include',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ email: 'cook@example.com', password: 'Tomato5oup' })
/// });
///
/// if (response.ok) {
///   const { token, user } = await response.json();
///   localStorage.setItem('authToken', token);
/// }
/// ```
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
    session: Session,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let user = services::auth::authenticate_user(pg_pool, &login_data.into_inner()).await?;
    let token = jwt::generate_jwt(
        ClaimsSpec {
            user_id: user.id,
            role: user.role.clone(),
        },
        &config.jwt_config,
    )?;

    session.renew();
    session
        .insert(SESSION_TOKEN_KEY, &token)
        .map_err(|_| AppError::Internal("Failed to insert token cookie".to_string()))?;

    Success::ok(AuthResponse { token, user })
}

/// Returns the caller's user record, or `null` when the request is anonymous.
///
/// # Output
/// - Success: the user object or `null`
///
/// # Frontend Example
/// ```javascript
/// const me = await (await fetch('/api/auth/me', { credentials: 'include' })).json();
/// if (me === null) showLogin();
/// ```
#[get("/me")]
pub async fn get_me(req: HttpRequest, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let Some(claims) = jwt::optional_claims(&req) else {
        return Success::ok(None::<User>);
    };
    let pg_pool: &PgPool = &pool;
    match db::user::get_user_by_id(pg_pool, claims.user_id).await {
        Ok(user) => Success::ok(Some(user)),
        // token outlived its account
        Err(AppError::NotFound(_)) => Success::ok(None),
        Err(e) => Err(e),
    }
}

/// Clears the session cookie.
///
/// # Output
/// - Success: `{ "success": true }`
#[post("/logout")]
pub async fn post_logout(session: Session) -> Res<impl Responder> {
    session.purge();
    Success::ok(Done::new())
}

/// Updates the caller's display name. A blank name clears it.
///
/// # Input
/// - `{ "name": "Sam Cook" }`
///
/// # Output
/// - Success: the updated user object
///
/// # Frontend Example
/// ```javascript
/// await fetch('/api/account/auth/profile', {
///   method: 'PUT',
///   credentials: 'include',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ name: 'Sam Cook' })
/// });
/// ```
#[put("/profile")]
pub async fn put_profile(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<UpdateProfileRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let user = services::auth::update_profile(pg_pool, claims.user_id, req.into_inner()).await?;
    Success::ok(user)
}

/// Replaces the caller's password after checking the current one.
///
/// # Input
/// - `{ "current_password": "...", "new_password": "..." }`
///
/// # Output
/// - Success: `{ "success": true }`
/// - Error: 401 when the current password is wrong, 400 for a weak new password
#[post("/change-password")]
pub async fn post_change_password(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<ChangePasswordRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    services::auth::change_password(pg_pool, claims.user_id, req.into_inner()).await?;
    Success::ok(Done::new())
}
