/// Registration and login service
///
/// Registration hashes the password, then hands the insert to the store and
/// lets its uniqueness constraint arbitrate duplicates. There is no
/// check-then-insert window: when two requests race over the same username
/// or email, the store picks exactly one winner and the loser surfaces as a
/// conflict, whatever the request ordering was.
///
/// Login failures are deliberately indistinguishable. An unknown email and a
/// wrong password produce the same error with the same message, so responses
/// do not confirm which emails have accounts.

use std::sync::Arc;

use chrono::Duration;

use crate::auth::jwt::{self, Claims};
use crate::auth::password;
use crate::models::user::{CreateUser, NewUser, User};
use crate::repo::{RepoError, UserRepository};
use crate::service::ServiceError;

/// The registration/login service.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    /// Creates the service.
    ///
    /// `token_ttl_hours` controls how long issued access tokens stay valid.
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt_secret: impl Into<String>,
        token_ttl_hours: i64,
    ) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::hours(token_ttl_hours),
        }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` when username, email, or password is empty
    /// - `ServiceError::Conflict` when the username or email is taken
    pub async fn register(&self, input: NewUser) -> Result<User, ServiceError> {
        let username = input.username.trim();
        let email = input.email.trim();

        if username.is_empty() {
            return Err(ServiceError::Validation("Username is required".to_string()));
        }
        if email.is_empty() {
            return Err(ServiceError::Validation("Email is required".to_string()));
        }
        if input.password.is_empty() {
            return Err(ServiceError::Validation("Password is required".to_string()));
        }

        let password_hash = password::hash_password(&input.password)?;

        let created = self
            .users
            .create(CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                full_name: input.full_name.unwrap_or_default(),
                avatar_url: None,
            })
            .await;

        match created {
            Ok(user) => {
                tracing::info!(user_id = user.id, "User registered");
                Ok(user)
            }
            Err(RepoError::Conflict(_)) => {
                Err(ServiceError::Conflict("User already exists".to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Authenticates an email/password pair and issues an access token.
    ///
    /// # Errors
    ///
    /// `ServiceError::Unauthorized` for unknown emails and wrong passwords
    /// alike.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), ServiceError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(ServiceError::Unauthorized),
        };

        if !password::verify_password(password, &user.password_hash)? {
            return Err(ServiceError::Unauthorized);
        }

        let claims = Claims::with_expiration(user.id, self.token_ttl);
        let token = jwt::create_token(&claims, &self.jwt_secret)?;

        tracing::info!(user_id = user.id, "User logged in");
        Ok((user, token))
    }
}
