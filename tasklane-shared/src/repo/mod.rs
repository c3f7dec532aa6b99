/// Persistence layer
///
/// Repository traits keep the services independent of storage. `PgRepository`
/// is the production implementation backed by PostgreSQL; `MemoryRepository`
/// implements the same contract over in-process maps and backs the test
/// suites.
///
/// All read paths exclude soft-deleted rows. Uniqueness (usernames and
/// emails) is enforced by the store itself, not by pre-flight checks, so
/// concurrent registrations of the same identity resolve to exactly one
/// winner no matter how the requests interleave.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasklane_shared::repo::{MemoryRepository, UserRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = Arc::new(MemoryRepository::new());
/// let users: Arc<dyn UserRepository> = repo;
/// assert_eq!(users.count().await?, 0);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::models::task::{CreateTask, Task, TaskDetail};
use crate::models::user::{CreateUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Row does not exist or is soft-deleted
    #[error("record not found")]
    NotFound,

    /// A uniqueness constraint rejected the write
    #[error("conflict on {0}")]
    Conflict(String),

    /// Any other storage failure
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return RepoError::NotFound;
        }

        if let sqlx::Error::Database(ref db) = err {
            match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    let constraint = db.constraint().unwrap_or("unique constraint").to_string();
                    return RepoError::Conflict(constraint);
                }
                // A dangling creator/assignee reference reads as a missing user
                sqlx::error::ErrorKind::ForeignKeyViolation => return RepoError::NotFound,
                _ => {}
            }
        }

        RepoError::Database(err)
    }
}

/// Storage contract for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user. Fails with `RepoError::Conflict` if the username
    /// or email is already taken by a live user.
    async fn create(&self, data: CreateUser) -> Result<User, RepoError>;

    /// Fetches a live user by id.
    async fn find_by_id(&self, id: i64) -> Result<User, RepoError>;

    /// Looks up a live user by email. Returns `None` when no such user
    /// exists so callers can decide how much to reveal.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Lists all live users ordered by id.
    async fn list(&self) -> Result<Vec<User>, RepoError>;

    /// Counts live users.
    async fn count(&self) -> Result<i64, RepoError>;
}

/// Storage contract for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task row.
    async fn create(&self, data: CreateTask) -> Result<Task, RepoError>;

    /// Fetches a live task with creator and assignee resolved.
    async fn find_by_id(&self, id: i64) -> Result<TaskDetail, RepoError>;

    /// Lists a page of live tasks ordered by id, plus the total live count.
    async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<TaskDetail>, i64), RepoError>;

    /// Persists the full state of an existing live task.
    async fn update(&self, task: &Task) -> Result<Task, RepoError>;

    /// Marks a live task as deleted. Already-deleted and unknown ids both
    /// report `RepoError::NotFound`.
    async fn soft_delete(&self, id: i64) -> Result<(), RepoError>;

    /// Counts live tasks.
    async fn count_all(&self) -> Result<i64, RepoError>;

    /// Returns every live task, for aggregate recomputation.
    async fn find_live(&self) -> Result<Vec<Task>, RepoError>;
}
