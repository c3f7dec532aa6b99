/// User account models
///
/// Users authenticate with an email/password pair and are referenced by tasks
/// as creators and assignees. Rows are soft-deleted: a tombstone timestamp
/// hides the record from every read path while preserving referential
/// integrity for tasks that point at it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user account.
///
/// `password_hash` and `deleted_at` are internal fields and are never
/// serialized into API responses.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Registration request payload.
///
/// Carries the plaintext password exactly once; it is hashed before anything
/// is persisted and never stored or logged.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Data required to insert a user row.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=3,p=4$c2FsdA$aGFzaA".to_string(),
            full_name: "Alice Example".to_string(),
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_user_serialization_hides_internal_fields() {
        let user = sample_user();
        let value = serde_json::to_value(&user).expect("Should serialize");

        assert_eq!(value["username"], "alice");
        assert_eq!(value["email"], "alice@example.com");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("deleted_at").is_none());
    }

    #[test]
    fn test_new_user_full_name_is_optional() {
        let input: NewUser = serde_json::from_str(
            r#"{"username":"bob","email":"bob@example.com","password":"secret"}"#,
        )
        .expect("Should deserialize");

        assert_eq!(input.username, "bob");
        assert_eq!(input.email, "bob@example.com");
        assert_eq!(input.full_name, None);
    }
}
