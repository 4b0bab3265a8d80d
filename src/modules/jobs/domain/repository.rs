/// Repository trait for job persistence
///
/// Defines the interface for the durable queue. Implementation uses Diesel
/// with PostgreSQL and `FOR UPDATE SKIP LOCKED` dequeue so several worker
/// processes can share one queue.
use crate::modules::jobs::domain::entities::{Job, JobRecord};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Enqueue a new job. Duplicate enqueues for the same user are legal;
    /// redundant recalculation is tolerated downstream.
    async fn enqueue(&self, job: Job) -> AppResult<JobRecord>;

    /// Atomically claim the next eligible job (pending, run_at due).
    /// Returns None if no jobs are available.
    async fn dequeue(&self) -> AppResult<Option<JobRecord>>;

    /// Mark job as completed
    async fn mark_completed(&self, job_id: Uuid) -> AppResult<()>;

    /// Record a failed attempt. While attempts remain the job returns to
    /// pending with `run_at` pushed out by `retry_delay`; otherwise it is
    /// terminally failed.
    async fn mark_failed(&self, job_id: Uuid, error: &str, retry_delay: Duration) -> AppResult<()>;

    /// Get job by ID
    async fn get_by_id(&self, job_id: Uuid) -> AppResult<Option<JobRecord>>;

    /// Get all pending jobs (for monitoring)
    async fn get_pending_jobs(&self) -> AppResult<Vec<JobRecord>>;

    /// Get job statistics
    async fn get_statistics(&self) -> AppResult<JobStatistics>;
}

/// Job queue statistics
#[derive(Debug, Clone)]
pub struct JobStatistics {
    pub pending_count: i64,
    pub running_count: i64,
    pub completed_count: i64,
    pub failed_count: i64,
    pub total_count: i64,
}
