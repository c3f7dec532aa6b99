/// Demo seed data
///
/// Populates a fresh database with three demo accounts and a handful of
/// tasks spread across statuses and priorities, so a development setup has
/// something to list and the live-task gauge has something to show.
///
/// Seeding only runs when the user table is empty, so it is safe to leave
/// enabled across restarts; it will never touch a database that already has
/// accounts. All demo accounts share the password `password123`.

use anyhow::Context as _;
use tracing::{debug, info};

use crate::auth::password::hash_password;
use crate::models::task::{CreateTask, TaskPriority, TaskStatus};
use crate::models::user::CreateUser;
use crate::repo::{TaskRepository, UserRepository};

/// Password for every demo account.
const DEMO_PASSWORD: &str = "password123";

/// Seeds demo users and tasks into an empty store.
///
/// # Errors
///
/// Returns an error when hashing or any insert fails. A non-empty user
/// table is not an error; the seed just skips itself.
pub async fn seed_demo_data(
    users: &dyn UserRepository,
    tasks: &dyn TaskRepository,
) -> anyhow::Result<()> {
    let existing = users.count().await?;
    if existing > 0 {
        debug!(existing, "Users already present, skipping demo seed");
        return Ok(());
    }

    // One hash, shared by all demo accounts.
    let password_hash = hash_password(DEMO_PASSWORD).context("Failed to hash demo password")?;

    let admin = users
        .create(CreateUser {
            username: "admin".to_string(),
            email: "admin@tasklane.dev".to_string(),
            password_hash: password_hash.clone(),
            full_name: "Admin User".to_string(),
            avatar_url: None,
        })
        .await
        .context("Failed to create demo admin")?;

    let john = users
        .create(CreateUser {
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            password_hash: password_hash.clone(),
            full_name: "John Doe".to_string(),
            avatar_url: None,
        })
        .await
        .context("Failed to create demo user")?;

    users
        .create(CreateUser {
            username: "jane_smith".to_string(),
            email: "jane@example.com".to_string(),
            password_hash,
            full_name: "Jane Smith".to_string(),
            avatar_url: None,
        })
        .await
        .context("Failed to create demo user")?;

    info!("Demo users created");

    let demo_tasks = [
        CreateTask {
            title: "Set up project infrastructure".to_string(),
            description: Some(
                "Provision the database, wire up migrations, and configure monitoring".to_string(),
            ),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            due_date: None,
            creator_id: admin.id,
            assignee_id: Some(john.id),
        },
        CreateTask {
            title: "Implement user authentication".to_string(),
            description: Some("Password hashing plus token-based login".to_string()),
            status: TaskStatus::Completed,
            priority: TaskPriority::Medium,
            due_date: None,
            creator_id: admin.id,
            assignee_id: Some(john.id),
        },
        CreateTask {
            title: "Build the task management API".to_string(),
            description: Some("CRUD endpoints with pagination".to_string()),
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            due_date: None,
            creator_id: john.id,
            assignee_id: None,
        },
    ];

    for task in demo_tasks {
        tasks
            .create(task)
            .await
            .context("Failed to create demo task")?;
    }

    info!("Demo tasks created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MemoryRepository;

    #[tokio::test]
    async fn test_seed_populates_empty_store() {
        let repo = MemoryRepository::new();

        seed_demo_data(&repo, &repo).await.expect("Seed should succeed");

        assert_eq!(UserRepository::count(&repo).await.unwrap(), 3);
        let live = TaskRepository::find_live(&repo).await.unwrap();
        assert_eq!(live.len(), 3);
        assert!(live.iter().any(|t| t.status == TaskStatus::Completed));
    }

    #[tokio::test]
    async fn test_seed_skips_populated_store() {
        let repo = MemoryRepository::new();

        seed_demo_data(&repo, &repo).await.expect("Seed should succeed");
        seed_demo_data(&repo, &repo)
            .await
            .expect("Second seed should be a no-op");

        assert_eq!(UserRepository::count(&repo).await.unwrap(), 3);
        assert_eq!(TaskRepository::find_live(&repo).await.unwrap().len(), 3);
    }
}
