//! User accounts and session authentication.

use std::future::Future;
use std::sync::Arc;

use bizdesk_shared::auth::{LoginResponse, UserInfo};
use bizdesk_shared::{AppError, AppResult, JwtService};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Role;
use super::password::{hash_password, verify_password};
use crate::validation::require_non_blank;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

const INVALID_CREDENTIALS: &str = "Email or password incorrect!";

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Argon2id PHC hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Administrator flag.
    pub is_admin: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Role granted to this user's tokens.
    #[must_use]
    pub const fn role(&self) -> Role {
        Role::for_user(self.is_admin)
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Administrator flag.
    pub is_admin: bool,
}

/// A user ready to be persisted, password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Argon2id PHC hash.
    pub password_hash: String,
    /// Administrator flag.
    pub is_admin: bool,
}

/// Repository trait for user persistence.
pub trait UserRepository: Send + Sync {
    /// Find a user by login email.
    fn find_by_email(&self, email: &str) -> impl Future<Output = AppResult<Option<User>>> + Send;

    /// Find a user by ID.
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = AppResult<Option<User>>> + Send;

    /// Create a user.
    fn create(&self, input: NewUser) -> impl Future<Output = AppResult<User>> + Send;
}

/// User service: registration and login.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    jwt: Arc<JwtService>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service.
    #[must_use]
    pub fn new(repo: Arc<R>, jwt: Arc<JwtService>) -> Self {
        Self { repo, jwt }
    }

    /// Registers a user with an unused email.
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        require_non_blank("Name", &input.name)?;
        require_non_blank("Email", &input.email)?;
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must have at least {MIN_PASSWORD_LEN} characters!"
            )));
        }

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::already_exists("User"));
        }

        let password_hash = hash_password(&input.password)?;

        self.repo
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                is_admin: input.is_admin,
            })
            .await
    }

    /// Checks credentials and issues an access token.
    ///
    /// Unknown emails and wrong passwords fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let access_token = self
            .jwt
            .generate_access_token(user.id, user.role().as_str())
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(LoginResponse {
            user: UserInfo::from(&user),
            access_token,
            expires_in: self.jwt.access_token_expires_in(),
        })
    }

    /// Fetches a user by ID.
    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }
}
