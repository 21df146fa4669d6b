//! Registration, login, and profile lookups.

use std::sync::Arc;

use tracing::info;

use vault_auth::jwt::encoder::{IssuedToken, JwtEncoder};
use vault_auth::password::{PasswordHasher, PasswordValidator};
use vault_core::error::AppError;
use vault_database::repositories::user::UserRepository;
use vault_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Usernames shorter than this are rejected.
const MIN_USERNAME_LEN: usize = 3;
/// Usernames longer than this are rejected.
const MAX_USERNAME_LEN: usize = 100;

/// Manages user accounts and credentials.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    password_validator: PasswordValidator,
    jwt_encoder: JwtEncoder,
}

/// Request to register a new account.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Plaintext password, validated against the policy before hashing.
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// A user together with a freshly issued access token.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthenticatedUser {
    /// The account.
    pub user: User,
    /// Bearer token to present on subsequent requests.
    #[serde(flatten)]
    pub token: IssuedToken,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        password_validator: PasswordValidator,
        jwt_encoder: JwtEncoder,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            password_validator,
            jwt_encoder,
        }
    }

    /// Registers a new account and signs the caller in.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthenticatedUser, AppError> {
        let username = validate_username(&req.username)?;
        self.password_validator.validate(&req.password)?;

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                username,
                email: req.email,
                password_hash,
            })
            .await?;

        let token = self.jwt_encoder.generate_token(user.id, &user.username)?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(AuthenticatedUser { user, token })
    }

    /// Verifies credentials and issues an access token.
    ///
    /// An unknown username and a wrong password produce the same error, so
    /// the login endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthenticatedUser, AppError> {
        let user = self
            .user_repo
            .find_by_username(req.username.trim())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid credentials"))?;

        if !self.hasher.verify_password(&req.password, &user.password_hash)? {
            return Err(AppError::authentication("Invalid credentials"));
        }

        let token = self.jwt_encoder.generate_token(user.id, &user.username)?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedUser { user, token })
    }

    /// Returns the calling user's account.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

/// Trims and length-checks a username.
fn validate_username(username: &str) -> Result<String, AppError> {
    let trimmed = username.trim();
    let len = trimmed.chars().count();
    if len < MIN_USERNAME_LEN {
        return Err(AppError::validation(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters long"
        )));
    }
    if len > MAX_USERNAME_LEN {
        return Err(AppError::validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters long"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        assert_eq!(validate_username("  ansel  ").unwrap(), "ansel");
    }

    #[test]
    fn username_too_short() {
        assert!(validate_username("ab").is_err());
        // Whitespace does not count toward the minimum.
        assert!(validate_username("  a  ").is_err());
    }

    #[test]
    fn username_too_long() {
        assert!(validate_username(&"x".repeat(101)).is_err());
        assert!(validate_username(&"x".repeat(100)).is_ok());
    }
}
