/// Business logic services
///
/// Two services own all domain rules:
///
/// - [`tasks::TaskService`]: the task lifecycle (create, read, update,
///   delete, list) plus the metrics recomputation that follows every
///   successful mutation.
/// - [`auth::AuthService`]: registration and login, producing signed access
///   tokens.
///
/// Both sit on the repository traits, so they run identically over
/// PostgreSQL and the in-memory store.

use crate::auth::jwt::JwtError;
use crate::auth::password::PasswordError;
use crate::repo::RepoError;

pub mod auth;
pub mod tasks;

pub use auth::AuthService;
pub use tasks::TaskService;

/// Error type for service operations.
///
/// Variants map one-to-one onto HTTP failure classes at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input failed a domain rule
    #[error("{0}")]
    Validation(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Credentials did not check out. The message is identical for unknown
    /// emails and wrong passwords so responses do not reveal which it was.
    #[error("Invalid credentials")]
    Unauthorized,

    /// A uniqueness rule rejected the request
    #[error("{0}")]
    Conflict(String),

    /// Storage failed
    #[error("storage error: {0}")]
    Repo(#[source] RepoError),

    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token creation failed
    #[error(transparent)]
    Token(#[from] JwtError),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ServiceError::NotFound("Resource not found".to_string()),
            RepoError::Conflict(_) => {
                ServiceError::Conflict("Resource already exists".to_string())
            }
            other => ServiceError::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_not_found_maps_to_not_found() {
        let err: ServiceError = RepoError::NotFound.into();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_repo_conflict_maps_to_conflict() {
        let err: ServiceError = RepoError::Conflict("users_email_live_idx".to_string()).into();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn test_unauthorized_message_is_generic() {
        assert_eq!(ServiceError::Unauthorized.to_string(), "Invalid credentials");
    }
}
