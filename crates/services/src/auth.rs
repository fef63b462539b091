//! Registration, login, and token verification.

use std::sync::Arc;

use uuid::Uuid;

use domains::{AppError, AuthClaims, PasswordHasher, Result, TokenIssuer, User, UserStore};

const MIN_USERNAME_CHARS: usize = 4;
const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Creates an account. The store's unique index has the final word on
    /// username collisions.
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.chars().count() < MIN_USERNAME_CHARS {
            return Err(AppError::Validation(format!(
                "username must be at least {MIN_USERNAME_CHARS} characters"
            )));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::Validation(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        let user = User {
            id: Uuid::now_v7(),
            username: username.to_string(),
            password_hash: self.hasher.hash(password)?,
            bookmarks: Default::default(),
        };
        self.users.insert(user.clone()).await?;
        tracing::info!(username = %user.username, "registered user");
        Ok(user)
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown usernames and wrong passwords produce the same error so the
    /// response does not leak which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String)> {
        let rejected = || AppError::Unauthorized("wrong username or password".to_string());

        let user = self
            .users
            .find_by_username(username.trim())
            .await?
            .ok_or_else(rejected)?;
        if !self.hasher.verify(password, &user.password_hash) {
            return Err(rejected());
        }

        let token = self.tokens.issue(user.id, &user.username)?;
        tracing::debug!(username = %user.username, "issued session token");
        Ok((user, token))
    }

    /// Checks a presented token and returns its claims.
    pub fn authenticate(&self, token: &str) -> Result<AuthClaims> {
        self.tokens.verify(token)
    }
}
