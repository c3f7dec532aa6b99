/// In-memory repository implementation
///
/// Implements the repository traits over plain maps behind an async lock.
/// Behavior mirrors the PostgreSQL implementation closely enough that the
/// services cannot tell them apart: the same soft-delete visibility rules,
/// the same id ordering, and the same conflict reporting (including the
/// constraint names the partial unique indexes would produce).
///
/// Used by the test suites; also handy for local experiments that do not
/// need a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::task::{CreateTask, Task, TaskDetail};
use crate::models::user::{CreateUser, User};
use crate::repo::{RepoError, TaskRepository, UserRepository};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, User>,
    tasks: HashMap<i64, Task>,
    next_user_id: i64,
    next_task_id: i64,
}

/// Repository over in-process maps.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Inner>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn hydrate(inner: &Inner, task: Task) -> Result<TaskDetail, RepoError> {
        let creator = inner
            .users
            .get(&task.creator_id)
            .cloned()
            .ok_or(RepoError::NotFound)?;

        let assignee = match task.assignee_id {
            Some(id) => Some(inner.users.get(&id).cloned().ok_or(RepoError::NotFound)?),
            None => None,
        };

        Ok(TaskDetail {
            task,
            creator,
            assignee,
        })
    }

    fn live_tasks_sorted(inner: &Inner) -> Vec<Task> {
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|task| task.deleted_at.is_none())
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.id);
        tasks
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn create(&self, data: CreateUser) -> Result<User, RepoError> {
        let mut inner = self.inner.write().await;

        // Same uniqueness scope as the partial indexes: live rows only.
        for user in inner.users.values().filter(|u| u.deleted_at.is_none()) {
            if user.username == data.username {
                return Err(RepoError::Conflict("users_username_live_idx".to_string()));
            }
            if user.email == data.email {
                return Err(RepoError::Conflict("users_email_live_idx".to_string()));
            }
        }

        inner.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.next_user_id,
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            full_name: data.full_name,
            avatar_url: data.avatar_url,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, RepoError> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(&id)
            .filter(|user| user.deleted_at.is_none())
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|user| user.deleted_at.is_none() && user.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner
            .users
            .values()
            .filter(|user| user.deleted_at.is_none())
            .cloned()
            .collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn count(&self) -> Result<i64, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .filter(|user| user.deleted_at.is_none())
            .count() as i64)
    }
}

#[async_trait]
impl TaskRepository for MemoryRepository {
    async fn create(&self, data: CreateTask) -> Result<Task, RepoError> {
        let mut inner = self.inner.write().await;

        inner.next_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: inner.next_task_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            creator_id: data.creator_id,
            assignee_id: data.assignee_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        inner.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> Result<TaskDetail, RepoError> {
        let inner = self.inner.read().await;
        let task = inner
            .tasks
            .get(&id)
            .filter(|task| task.deleted_at.is_none())
            .cloned()
            .ok_or(RepoError::NotFound)?;

        Self::hydrate(&inner, task)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<TaskDetail>, i64), RepoError> {
        let inner = self.inner.read().await;
        let live = Self::live_tasks_sorted(&inner);
        let total = live.len() as i64;

        let page: Vec<Task> = live
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();

        let details = page
            .into_iter()
            .map(|task| Self::hydrate(&inner, task))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((details, total))
    }

    async fn update(&self, task: &Task) -> Result<Task, RepoError> {
        let mut inner = self.inner.write().await;

        let entry = inner
            .tasks
            .get_mut(&task.id)
            .filter(|stored| stored.deleted_at.is_none())
            .ok_or(RepoError::NotFound)?;

        let mut updated = task.clone();
        updated.created_at = entry.created_at;
        updated.updated_at = Utc::now();
        updated.deleted_at = None;
        *entry = updated.clone();

        Ok(updated)
    }

    async fn soft_delete(&self, id: i64) -> Result<(), RepoError> {
        let mut inner = self.inner.write().await;

        let entry = inner
            .tasks
            .get_mut(&id)
            .filter(|stored| stored.deleted_at.is_none())
            .ok_or(RepoError::NotFound)?;

        let now = Utc::now();
        entry.deleted_at = Some(now);
        entry.updated_at = now;

        Ok(())
    }

    async fn count_all(&self) -> Result<i64, RepoError> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .values()
            .filter(|task| task.deleted_at.is_none())
            .count() as i64)
    }

    async fn find_live(&self) -> Result<Vec<Task>, RepoError> {
        let inner = self.inner.read().await;
        Ok(Self::live_tasks_sorted(&inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{TaskPriority, TaskStatus};

    fn user_input(username: &str, email: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            full_name: String::new(),
            avatar_url: None,
        }
    }

    fn task_input(title: &str, creator_id: i64) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
            creator_id,
            assignee_id: None,
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let repo = MemoryRepository::new();

        let first = UserRepository::create(&repo, user_input("a", "a@example.com"))
            .await
            .unwrap();
        let second = UserRepository::create(&repo, user_input("b", "b@example.com"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(UserRepository::count(&repo).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = MemoryRepository::new();

        UserRepository::create(&repo, user_input("alice", "alice@example.com"))
            .await
            .unwrap();
        let result = UserRepository::create(&repo, user_input("alice", "other@example.com")).await;

        assert!(matches!(result, Err(RepoError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = MemoryRepository::new();

        UserRepository::create(&repo, user_input("alice", "alice@example.com"))
            .await
            .unwrap();
        let result = UserRepository::create(&repo, user_input("bob", "alice@example.com")).await;

        assert!(matches!(result, Err(RepoError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_task_detail_resolves_users() {
        let repo = MemoryRepository::new();
        let creator = UserRepository::create(&repo, user_input("alice", "alice@example.com"))
            .await
            .unwrap();
        let assignee = UserRepository::create(&repo, user_input("bob", "bob@example.com"))
            .await
            .unwrap();

        let mut input = task_input("Review PR", creator.id);
        input.assignee_id = Some(assignee.id);
        let task = TaskRepository::create(&repo, input).await.unwrap();

        let detail = TaskRepository::find_by_id(&repo, task.id).await.unwrap();
        assert_eq!(detail.creator.id, creator.id);
        assert_eq!(detail.assignee.as_ref().map(|u| u.id), Some(assignee.id));
    }

    #[tokio::test]
    async fn test_list_paginates_in_id_order() {
        let repo = MemoryRepository::new();
        let creator = UserRepository::create(&repo, user_input("alice", "alice@example.com"))
            .await
            .unwrap();

        for i in 0..5 {
            TaskRepository::create(&repo, task_input(&format!("task {i}"), creator.id))
                .await
                .unwrap();
        }

        assert_eq!(TaskRepository::count_all(&repo).await.unwrap(), 5);

        let (page, total) = TaskRepository::list(&repo, 2, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(
            page.iter().map(|d| d.task.id).collect::<Vec<_>>(),
            vec![3, 4]
        );

        // Offset past the end yields an empty page but the same total.
        let (page, total) = TaskRepository::list(&repo, 10, 2).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 5);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_task_everywhere() {
        let repo = MemoryRepository::new();
        let creator = UserRepository::create(&repo, user_input("alice", "alice@example.com"))
            .await
            .unwrap();
        let task = TaskRepository::create(&repo, task_input("Doomed", creator.id))
            .await
            .unwrap();

        TaskRepository::soft_delete(&repo, task.id).await.unwrap();

        assert!(matches!(
            TaskRepository::find_by_id(&repo, task.id).await,
            Err(RepoError::NotFound)
        ));
        let (page, total) = TaskRepository::list(&repo, 0, 10).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 0);
        assert_eq!(TaskRepository::count_all(&repo).await.unwrap(), 0);
        assert!(TaskRepository::find_live(&repo).await.unwrap().is_empty());

        // Deleting twice reports not-found, same as an unknown id.
        assert!(matches!(
            TaskRepository::soft_delete(&repo, task.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_preserves_created_at_and_refuses_deleted() {
        let repo = MemoryRepository::new();
        let creator = UserRepository::create(&repo, user_input("alice", "alice@example.com"))
            .await
            .unwrap();
        let task = TaskRepository::create(&repo, task_input("Original", creator.id))
            .await
            .unwrap();

        let mut patched = task.clone();
        patched.title = "Renamed".to_string();
        patched.status = TaskStatus::InProgress;

        let updated = TaskRepository::update(&repo, &patched).await.unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.created_at, task.created_at);

        TaskRepository::soft_delete(&repo, task.id).await.unwrap();
        assert!(matches!(
            TaskRepository::update(&repo, &patched).await,
            Err(RepoError::NotFound)
        ));
    }
}
