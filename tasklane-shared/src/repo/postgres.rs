/// PostgreSQL repository implementation
///
/// Implements the repository traits over a sqlx connection pool. Soft
/// deletion is expressed directly in the SQL: every read carries
/// `deleted_at IS NULL` and a delete is an `UPDATE` that stamps the
/// tombstone, so the predicate doubles as a guard against double deletion.
///
/// Creator and assignee references on tasks are resolved with one batched
/// lookup per call (`WHERE id = ANY($1)`) instead of a query per task. User
/// lookups during hydration do not filter tombstones: a task created by a
/// since-removed user still renders its historical creator.
///
/// # Example
///
/// ```no_run
/// use tasklane_shared::db::pool::{create_pool, DatabaseConfig};
/// use tasklane_shared::repo::{PgRepository, TaskRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let repo = PgRepository::new(pool);
/// let (tasks, total) = repo.list(0, 10).await?;
/// println!("{} of {} tasks", tasks.len(), total);
/// # Ok(())
/// # }
/// ```

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskDetail};
use crate::models::user::{CreateUser, User};
use crate::repo::{RepoError, TaskRepository, UserRepository};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, full_name, avatar_url, created_at, updated_at, deleted_at";

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, creator_id, \
     assignee_id, created_at, updated_at, deleted_at";

/// Repository over a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    /// Creates a repository sharing the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the given users in one round trip, keyed by id.
    ///
    /// Tombstoned users are included on purpose; see the module docs.
    async fn load_users(&self, ids: &[i64]) -> Result<HashMap<i64, User>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let users = sqlx::query_as::<_, User>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }

    /// Resolves one task's user references against a preloaded map.
    fn hydrate(task: Task, users: &HashMap<i64, User>) -> Result<TaskDetail, RepoError> {
        let creator = users
            .get(&task.creator_id)
            .cloned()
            .ok_or(RepoError::NotFound)?;

        let assignee = match task.assignee_id {
            Some(id) => Some(users.get(&id).cloned().ok_or(RepoError::NotFound)?),
            None => None,
        };

        Ok(TaskDetail {
            task,
            creator,
            assignee,
        })
    }

    /// Collects the distinct user ids referenced by a batch of tasks.
    fn referenced_user_ids(tasks: &[Task]) -> Vec<i64> {
        let mut ids: Vec<i64> = tasks
            .iter()
            .flat_map(|task| [Some(task.creator_id), task.assignee_id])
            .flatten()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

#[async_trait]
impl UserRepository for PgRepository {
    async fn create(&self, data: CreateUser) -> Result<User, RepoError> {
        let query = format!(
            r#"
            INSERT INTO users (username, email, password_hash, full_name, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(&data.full_name)
            .bind(&data.avatar_url)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, RepoError> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        user.ok_or(RepoError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL");

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id");

        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn count(&self) -> Result<i64, RepoError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

#[async_trait]
impl TaskRepository for PgRepository {
    async fn create(&self, data: CreateTask) -> Result<Task, RepoError> {
        let query = format!(
            r#"
            INSERT INTO tasks (title, description, status, priority, due_date, creator_id, assignee_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TASK_COLUMNS}
            "#
        );

        let task = sqlx::query_as::<_, Task>(&query)
            .bind(&data.title)
            .bind(&data.description)
            .bind(data.status)
            .bind(data.priority)
            .bind(data.due_date)
            .bind(data.creator_id)
            .bind(data.assignee_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> Result<TaskDetail, RepoError> {
        let query =
            format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND deleted_at IS NULL");

        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)?;

        let users = self
            .load_users(&Self::referenced_user_ids(std::slice::from_ref(&task)))
            .await?;

        Self::hydrate(task, &users)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<TaskDetail>, i64), RepoError> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE deleted_at IS NULL ORDER BY id LIMIT $1 OFFSET $2"
        );

        let tasks = sqlx::query_as::<_, Task>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = self.count_all().await?;

        let users = self.load_users(&Self::referenced_user_ids(&tasks)).await?;

        let details = tasks
            .into_iter()
            .map(|task| Self::hydrate(task, &users))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((details, total))
    }

    async fn update(&self, task: &Task) -> Result<Task, RepoError> {
        let query = format!(
            r#"
            UPDATE tasks
            SET title = $2,
                description = $3,
                status = $4,
                priority = $5,
                due_date = $6,
                assignee_id = $7,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {TASK_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Task>(&query)
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.status)
            .bind(task.priority)
            .bind(task.due_date)
            .bind(task.assignee_id)
            .fetch_optional(&self.pool)
            .await?;

        updated.ok_or(RepoError::NotFound)
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE tasks SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn count_all(&self) -> Result<i64, RepoError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn find_live(&self) -> Result<Vec<Task>, RepoError> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE deleted_at IS NULL");

        let tasks = sqlx::query_as::<_, Task>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }
}
