use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use common::{
    env_config::Config,
    error::{AppError, Res},
    misc::Role,
};
use db::{
    dtos::user::{CredentialsCreateRequest, UserCreateRequest},
    models::user::User,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::auth::{ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest},
    services::validate,
};

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Blank display names are stored as absent.
pub fn normalize_name(name: Option<String>) -> Option<String> {
    name.map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> Res<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Inserts user record and credentials in one transaction.
/// The configured owner email registers with the admin role.
pub async fn register_user(pool: &PgPool, req: RegisterRequest, config: &Config) -> Res<User> {
    let email = normalize_email(&req.email);
    validate::validate_email(&email)?;
    validate::validate_password(&req.password)?;

    if db::user::exists_user_by_email(pool, &email).await? {
        return Err(AppError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let role = if config.owner_email.as_deref() == Some(email.as_str()) {
        Role::Admin
    } else {
        Role::User
    };
    let password_hash = hash_password(&req.password)?;
    let name = normalize_name(req.name);

    let mut tx = pool.begin().await?;

    let user = db::user::insert_user(
        &mut *tx,
        UserCreateRequest {
            email,
            name,
            login_method: "email".to_string(),
            role,
        },
    )
    .await
    .map_err(duplicate_email_as_conflict)?;

    db::user::insert_user_credentials(
        &mut *tx,
        CredentialsCreateRequest {
            user_id: user.id,
            password_hash,
        },
    )
    .await?;

    tx.commit().await?;
    log::info!("Registered user {} with role {}", user.id, user.role);
    Ok(user)
}

/// Two registrations racing past the existence check end up here.
fn duplicate_email_as_conflict(error: AppError) -> AppError {
    match error {
        AppError::Database(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
            AppError::Conflict("An account with this email already exists".to_string())
        }
        other => other,
    }
}

/// Authenticates an existing user. Unknown emails and wrong passwords look the same to the caller.
pub async fn authenticate_user(pool: &PgPool, login_data: &LoginRequest) -> Res<User> {
    let email = normalize_email(&login_data.email);
    let record = db::user::get_user_with_password_hash(pool, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    if !verify_password(&login_data.password, &record.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    db::user::touch_last_signed_in(pool, record.user.id).await?;
    Ok(record.user)
}

pub async fn update_profile(pool: &PgPool, user_id: Uuid, req: UpdateProfileRequest) -> Res<User> {
    let user = db::user::update_user_name(pool, user_id, normalize_name(req.name)).await?;
    log::info!("Updated profile of user {}", user.id);
    Ok(user)
}

/// Checks the current password against `stored_hash`, then hashes the new one.
pub fn rehash_password(req: &ChangePasswordRequest, stored_hash: &str) -> Res<String> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(AppError::BadRequest(
            "Current password and new password are required".to_string(),
        ));
    }
    if !verify_password(&req.current_password, stored_hash)? {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }
    validate::validate_password(&req.new_password)?;
    hash_password(&req.new_password)
}

pub async fn change_password(pool: &PgPool, user_id: Uuid, req: ChangePasswordRequest) -> Res<()> {
    let stored_hash = db::user::get_password_hash(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    let new_hash = rehash_password(&req, &stored_hash)?;
    db::user::update_password_hash(pool, user_id, &new_hash).await?;
    log::info!("User {} changed their password", user_id);
    Ok(())
}
