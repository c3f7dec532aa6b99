/// Task models and lifecycle types
///
/// A task carries a closed status and priority lifecycle, optional scheduling
/// metadata, and references to the user who created it and the user it is
/// assigned to. Deleted tasks keep their row with a tombstone timestamp and
/// disappear from every read path and from the live-task metrics.
///
/// # Lifecycle
///
/// - Status: `pending` -> `in_progress` -> `completed` / `cancelled`
///   (transitions are unrestricted; the states themselves are closed)
/// - Priority: `low`, `medium`, `high`, `urgent`
///
/// Every task is born `pending` with priority `medium` unless the creator
/// asks for a different priority. A requested status at creation time is
/// ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Task status lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Gets the status as its wire string, also used as a metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Gets the priority as its wire string, also used as a metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

/// A task row.
///
/// `deleted_at` is the soft-delete tombstone and never leaves the service.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub creator_id: i64,
    pub assignee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A task with its creator and assignee resolved to full user records.
///
/// This is the shape every task read path returns.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub creator: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
}

/// A single page of tasks plus pagination metadata.
///
/// `total` counts all live tasks, not just the page contents.
#[derive(Debug, Clone, Serialize)]
pub struct TaskPage {
    pub tasks: Vec<TaskDetail>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Task creation request payload.
///
/// There is deliberately no `status` field: new tasks always start as
/// `pending`, and a status supplied by the client is ignored rather than
/// rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub assignee_id: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Data required to insert a task row.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub creator_id: i64,
    pub assignee_id: Option<i64>,
}

/// Task update request payload.
///
/// Every field is optional; omitted fields keep their current value. For the
/// nullable fields the payload distinguishes "absent" (keep) from "null"
/// (clear), so `{"assignee_id": null}` unassigns the task while leaving
/// `assignee_id` out entirely changes nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub assignee_id: Option<Option<i64>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}
