/// Domain models for Tasklane
///
/// This module contains the domain entities plus the request and response
/// payloads that cross the HTTP boundary.
///
/// # Models
///
/// - `user`: User accounts and registration payloads
/// - `task`: Tasks, their status/priority lifecycles, and patch payloads
/// - `response`: The uniform API response envelope
///
/// # Example
///
/// ```no_run
/// use tasklane_shared::models::task::{NewTask, TaskPriority};
///
/// let input = NewTask {
///     title: "Write onboarding docs".to_string(),
///     description: Some("Cover local setup and deploy".to_string()),
///     priority: Some(TaskPriority::High),
///     assignee_id: None,
///     due_date: None,
/// };
/// assert_eq!(input.priority, Some(TaskPriority::High));
/// ```

pub mod response;
pub mod task;
pub mod user;
