/// Task lifecycle service
///
/// Owns every task rule: forced initial status, priority defaulting,
/// reference checks against the user store, pagination bounds, and the
/// metrics recomputation that follows each successful mutation.
///
/// Updates are last-write-wins. Two clients patching the same task race on
/// the store and the later write overwrites the earlier one; there is no
/// version check. The final state is still always a state some client asked
/// for, and the metrics snapshot converges with the last mutation.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasklane_shared::metrics::TaskMetrics;
/// use tasklane_shared::models::task::NewTask;
/// use tasklane_shared::repo::MemoryRepository;
/// use tasklane_shared::service::TaskService;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = Arc::new(MemoryRepository::new());
/// let metrics = Arc::new(TaskMetrics::new()?);
/// let service = TaskService::new(repo.clone(), repo, metrics);
///
/// let input = NewTask {
///     title: "Triage inbox".to_string(),
///     description: None,
///     priority: None,
///     assignee_id: None,
///     due_date: None,
/// };
/// let detail = service.create(input, 1).await?;
/// println!("created task {}", detail.task.id);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use crate::metrics::TaskMetrics;
use crate::models::task::{CreateTask, NewTask, TaskDetail, TaskPage, TaskStatus, UpdateTask};
use crate::repo::{RepoError, TaskRepository, UserRepository};
use crate::service::ServiceError;

/// Largest permitted page size for task listings.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// The task lifecycle service.
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    users: Arc<dyn UserRepository>,
    metrics: Arc<TaskMetrics>,
}

impl TaskService {
    /// Creates the service over the given stores and metrics registry.
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        metrics: Arc<TaskMetrics>,
    ) -> Self {
        Self {
            tasks,
            users,
            metrics,
        }
    }

    /// Creates a task on behalf of `creator_id`.
    ///
    /// The task always starts as `pending` regardless of anything the client
    /// sent; priority defaults to `medium` when omitted. Both the creator
    /// (taken from the verified token, never from the payload) and the
    /// assignee, if any, must resolve to existing users.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` for an empty or whitespace-only title
    /// - `ServiceError::NotFound` when the creator or assignee is unknown
    pub async fn create(
        &self,
        input: NewTask,
        creator_id: i64,
    ) -> Result<TaskDetail, ServiceError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(ServiceError::Validation("Title is required".to_string()));
        }

        self.require_user(creator_id).await?;
        if let Some(assignee_id) = input.assignee_id {
            self.require_user(assignee_id).await?;
        }

        let record = CreateTask {
            title: title.to_string(),
            description: input.description,
            status: TaskStatus::Pending,
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
            creator_id,
            assignee_id: input.assignee_id,
        };

        let created = self.tasks.create(record).await?;
        let detail = self.tasks.find_by_id(created.id).await?;

        tracing::info!(task_id = detail.task.id, creator_id, "Task created");
        self.recompute_metrics().await;

        Ok(detail)
    }

    /// Fetches one task with its user references resolved.
    ///
    /// # Errors
    ///
    /// `ServiceError::NotFound` for unknown or deleted ids.
    pub async fn get(&self, id: i64) -> Result<TaskDetail, ServiceError> {
        match self.tasks.find_by_id(id).await {
            Ok(detail) => Ok(detail),
            Err(RepoError::NotFound) => {
                Err(ServiceError::NotFound("Task not found".to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Lists a page of tasks in stable id order.
    ///
    /// # Errors
    ///
    /// `ServiceError::Validation` when `page < 1` or `limit` falls outside
    /// `1..=100`.
    pub async fn list(&self, page: i64, limit: i64) -> Result<TaskPage, ServiceError> {
        if page < 1 {
            return Err(ServiceError::Validation(
                "Page must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(ServiceError::Validation(format!(
                "Limit must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        let offset = (page - 1) * limit;
        let (tasks, total) = self.tasks.list(offset, limit).await?;

        Ok(TaskPage {
            tasks,
            total,
            page,
            limit,
        })
    }

    /// Applies a partial update to a task.
    ///
    /// Omitted fields keep their values. For the nullable fields an explicit
    /// JSON null clears the value, so an assignee can be removed without
    /// touching anything else. A new assignee must resolve to an existing
    /// user.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` when the task is unknown or deleted, or a
    ///   new assignee does not exist
    /// - `ServiceError::Validation` when the patched title is empty
    pub async fn update(&self, id: i64, patch: UpdateTask) -> Result<TaskDetail, ServiceError> {
        let mut task = match self.tasks.find_by_id(id).await {
            Ok(detail) => detail.task,
            Err(RepoError::NotFound) => {
                return Err(ServiceError::NotFound("Task not found".to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(title) = patch.title {
            let trimmed = title.trim();
            if trimmed.is_empty() {
                return Err(ServiceError::Validation("Title is required".to_string()));
            }
            task.title = trimmed.to_string();
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(assignee) = patch.assignee_id {
            if let Some(assignee_id) = assignee {
                self.require_user(assignee_id).await?;
            }
            task.assignee_id = assignee;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }

        let updated = match self.tasks.update(&task).await {
            Ok(task) => task,
            Err(RepoError::NotFound) => {
                return Err(ServiceError::NotFound("Task not found".to_string()))
            }
            Err(err) => return Err(err.into()),
        };
        let detail = self.tasks.find_by_id(updated.id).await?;

        tracing::info!(task_id = id, "Task updated");
        self.recompute_metrics().await;

        Ok(detail)
    }

    /// Soft-deletes a task.
    ///
    /// The row keeps its data but disappears from reads, listings, and the
    /// live-task metrics. Deleting the same id twice reports not-found.
    ///
    /// # Errors
    ///
    /// `ServiceError::NotFound` for unknown or already-deleted ids.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        match self.tasks.soft_delete(id).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => {
                return Err(ServiceError::NotFound("Task not found".to_string()))
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(task_id = id, "Task deleted");
        self.recompute_metrics().await;

        Ok(())
    }

    /// Re-tabulates the live-task gauge from the full live set.
    ///
    /// Runs after every successful mutation and once at startup. A failure
    /// here never fails the mutation that triggered it; the previous
    /// snapshot simply stays up until the next successful recomputation.
    pub async fn recompute_metrics(&self) {
        match self.tasks.find_live().await {
            Ok(live) => self.metrics.rebuild(&live).await,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "Failed to tabulate live tasks; metrics keep the previous snapshot"
                );
            }
        }
    }

    async fn require_user(&self, user_id: i64) -> Result<(), ServiceError> {
        match self.users.find_by_id(user_id).await {
            Ok(_) => Ok(()),
            Err(RepoError::NotFound) => {
                Err(ServiceError::NotFound("User not found".to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
