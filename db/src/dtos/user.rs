use common::misc::Role;
use uuid::Uuid;

#[derive(Debug)]
pub struct UserCreateRequest {
    pub email: String,
    pub name: Option<String>,
    pub login_method: String,
    pub role: Role,
}

#[derive(Debug)]
pub struct CredentialsCreateRequest {
    pub user_id: Uuid,
    pub password_hash: String,
}
