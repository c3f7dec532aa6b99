/// Prometheus registry and live-task aggregation
///
/// The service keeps one gauge family, `tasks_active_total`, labeled by
/// `(status, priority)`, describing how many live tasks sit in each
/// combination. The gauge is not adjusted incrementally: after every
/// successful task mutation the full live set is re-tabulated and the family
/// is reset and rebuilt, so label pairs that drop to zero disappear instead
/// of lingering at 0. There is no background refresh; between mutations the
/// numbers simply stand.
///
/// A second family, `http_requests_total`, counts requests by method, route
/// template, and response status.
///
/// # Example
///
/// ```no_run
/// use tasklane_shared::metrics::TaskMetrics;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let metrics = TaskMetrics::new()?;
/// metrics.rebuild(&[]).await;
/// metrics.record_request("GET", "/api/tasks", 200);
///
/// let text = metrics.render()?;
/// assert!(text.contains("http_requests_total"));
/// # Ok(())
/// # }
/// ```

use std::collections::HashMap;

use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};
use tokio::sync::RwLock;

use crate::models::task::{Task, TaskPriority, TaskStatus};

/// Error type for metrics operations
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Collector registration or gathering failed
    #[error("metrics error: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// Exposition encoding produced invalid UTF-8
    #[error("metrics encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Counts live tasks per `(status, priority)` combination.
///
/// Pure and synchronous so it can be tested without a registry.
pub fn tabulate(tasks: &[Task]) -> HashMap<(TaskStatus, TaskPriority), i64> {
    let mut counts = HashMap::new();
    for task in tasks {
        *counts.entry((task.status, task.priority)).or_insert(0) += 1;
    }
    counts
}

/// Metrics registry plus the snapshot of the last tabulation.
///
/// The snapshot lets callers read the current aggregate counts without
/// scraping and parsing the exposition text.
pub struct TaskMetrics {
    registry: Registry,
    active_tasks: IntGaugeVec,
    http_requests: IntCounterVec,
    snapshot: RwLock<HashMap<(TaskStatus, TaskPriority), i64>>,
}

impl TaskMetrics {
    /// Creates a registry with both metric families registered.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::Prometheus` if a collector cannot be built or
    /// registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let active_tasks = IntGaugeVec::new(
            Opts::new(
                "tasks_active_total",
                "Number of live tasks by status and priority",
            ),
            &["status", "priority"],
        )?;

        let http_requests = IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "Total HTTP requests by method, endpoint, and status code",
            ),
            &["method", "endpoint", "status"],
        )?;

        registry.register(Box::new(active_tasks.clone()))?;
        registry.register(Box::new(http_requests.clone()))?;

        Ok(Self {
            registry,
            active_tasks,
            http_requests,
            snapshot: RwLock::new(HashMap::new()),
        })
    }

    /// Re-tabulates the gauge family from the full live-task set.
    ///
    /// The reset and rebuild happen under the snapshot write lock, so
    /// concurrent rebuilds cannot interleave their label writes.
    pub async fn rebuild(&self, live_tasks: &[Task]) {
        let counts = tabulate(live_tasks);

        let mut snapshot = self.snapshot.write().await;
        self.active_tasks.reset();
        for ((status, priority), count) in &counts {
            self.active_tasks
                .with_label_values(&[status.as_str(), priority.as_str()])
                .set(*count);
        }
        *snapshot = counts;
    }

    /// Returns a copy of the counts from the most recent rebuild.
    pub async fn snapshot(&self) -> HashMap<(TaskStatus, TaskPriority), i64> {
        self.snapshot.read().await.clone()
    }

    /// Counts one finished HTTP request.
    pub fn record_request(&self, method: &str, endpoint: &str, status: u16) {
        self.http_requests
            .with_label_values(&[method, endpoint, &status.to_string()])
            .inc();
    }

    /// Renders the registry in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` if encoding fails.
    pub fn render(&self) -> Result<String, MetricsError> {
        let mut buffer = Vec::new();
        let encoder = TextEncoder::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: 0,
            title: "t".to_string(),
            description: None,
            status,
            priority,
            due_date: None,
            creator_id: 1,
            assignee_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_tabulate_counts_pairs() {
        let tasks = vec![
            task(TaskStatus::Pending, TaskPriority::High),
            task(TaskStatus::Pending, TaskPriority::High),
            task(TaskStatus::Completed, TaskPriority::Low),
        ];

        let counts = tabulate(&tasks);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&(TaskStatus::Pending, TaskPriority::High)], 2);
        assert_eq!(counts[&(TaskStatus::Completed, TaskPriority::Low)], 1);
    }

    #[test]
    fn test_tabulate_empty() {
        assert!(tabulate(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_rebuild_replaces_previous_counts() {
        let metrics = TaskMetrics::new().expect("Should build registry");

        metrics
            .rebuild(&[task(TaskStatus::Pending, TaskPriority::High)])
            .await;
        let snapshot = metrics.snapshot().await;
        assert_eq!(snapshot[&(TaskStatus::Pending, TaskPriority::High)], 1);

        // The pair vanishes entirely once no live task carries it.
        metrics
            .rebuild(&[task(TaskStatus::Completed, TaskPriority::Low)])
            .await;
        let snapshot = metrics.snapshot().await;
        assert!(!snapshot.contains_key(&(TaskStatus::Pending, TaskPriority::High)));
        assert_eq!(snapshot[&(TaskStatus::Completed, TaskPriority::Low)], 1);

        let text = metrics.render().expect("Should render");
        assert!(text.contains(
            r#"tasks_active_total{priority="low",status="completed"} 1"#
        ));
        assert!(!text.contains(r#"status="pending""#));
    }

    #[tokio::test]
    async fn test_request_counter_accumulates() {
        let metrics = TaskMetrics::new().expect("Should build registry");

        metrics.record_request("GET", "/api/tasks", 200);
        metrics.record_request("GET", "/api/tasks", 200);
        metrics.record_request("POST", "/api/tasks", 201);

        let text = metrics.render().expect("Should render");
        assert!(text.contains(
            r#"http_requests_total{endpoint="/api/tasks",method="GET",status="200"} 2"#
        ));
        assert!(text.contains(
            r#"http_requests_total{endpoint="/api/tasks",method="POST",status="201"} 1"#
        ));
    }
}
