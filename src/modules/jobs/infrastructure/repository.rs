/// Diesel-based implementation of JobRepository
///
/// Uses PostgreSQL with SELECT FOR UPDATE SKIP LOCKED for atomic job
/// dequeuing, so several worker processes can safely share the queue.
use crate::modules::jobs::domain::entities::{Job, JobRecord};
use crate::modules::jobs::domain::repository::{JobRepository, JobStatistics};
use crate::modules::jobs::domain::value_objects::JobStatusDb;
use crate::modules::jobs::infrastructure::models::{NewJob, RecommendationJobModel};
use crate::schema::recommendation_jobs;
use crate::shared::database::{DbConnection, DbPool};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use diesel::prelude::*;
use std::time::Duration;
use uuid::Uuid;

/// Helper struct for COUNT queries
#[derive(QueryableByName)]
struct CountResult {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    count: i64,
}

pub struct JobRepositoryImpl {
    pool: DbPool,
}

impl JobRepositoryImpl {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
    }

    fn count_with_status(conn: &mut DbConnection, status: &str) -> AppResult<i64> {
        let result: CountResult = diesel::sql_query(format!(
            "SELECT COUNT(*) as count FROM recommendation_jobs WHERE status = '{}'",
            status
        ))
        .get_result(conn)
        .map_err(|e| AppError::DatabaseError(format!("Failed to count {}: {}", status, e)))?;
        Ok(result.count)
    }
}

#[async_trait]
impl JobRepository for JobRepositoryImpl {
    async fn enqueue(&self, job: Job) -> AppResult<JobRecord> {
        let new_job = NewJob {
            job_name: job.job_name,
            payload: job.payload,
            max_attempts: job.max_attempts,
            backoff_kind: job.backoff.kind.to_string(),
            backoff_delay_ms: job.backoff.delay.as_millis().min(i32::MAX as u128) as i32,
        };

        let mut conn = self.get_conn()?;

        let inserted: RecommendationJobModel = diesel::insert_into(recommendation_jobs::table)
            .values(&new_job)
            .get_result(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to enqueue job: {}", e)))?;

        Ok(inserted.to_job_record())
    }

    async fn dequeue(&self) -> AppResult<Option<JobRecord>> {
        let mut conn = self.get_conn()?;

        // Atomic dequeue: claims the oldest due pending job and counts the
        // attempt in the same statement.
        let result: Option<RecommendationJobModel> = diesel::sql_query(
            r#"
            UPDATE recommendation_jobs
            SET status = 'running',
                started_at = NOW(),
                attempts = attempts + 1
            WHERE id = (
                SELECT id
                FROM recommendation_jobs
                WHERE status = 'pending'
                  AND run_at <= NOW()
                  AND attempts < max_attempts
                ORDER BY created_at ASC
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING id, job_name, payload, status, attempts, max_attempts,
                      backoff_kind, backoff_delay_ms, run_at, created_at,
                      started_at, completed_at, error
            "#,
        )
        .get_result(&mut conn)
        .optional()
        .map_err(|e| AppError::DatabaseError(format!("Failed to dequeue job: {}", e)))?;

        Ok(result.map(|job| job.to_job_record()))
    }

    async fn mark_completed(&self, job_id: Uuid) -> AppResult<()> {
        let mut conn = self.get_conn()?;

        diesel::sql_query(
            "UPDATE recommendation_jobs
             SET status = 'completed', completed_at = NOW(), error = NULL
             WHERE id = $1",
        )
        .bind::<diesel::sql_types::Uuid, _>(job_id)
        .execute(&mut conn)
        .map_err(|e| AppError::DatabaseError(format!("Failed to mark job as completed: {}", e)))?;

        Ok(())
    }

    async fn mark_failed(&self, job_id: Uuid, error: &str, retry_delay: Duration) -> AppResult<()> {
        let mut conn = self.get_conn()?;

        // While attempts remain, return to pending with run_at pushed out by
        // the backoff delay; otherwise the job is terminally failed.
        diesel::sql_query(
            "UPDATE recommendation_jobs
             SET status = CASE
                 WHEN attempts < max_attempts THEN 'pending'::job_status
                 ELSE 'failed'::job_status
             END,
             completed_at = CASE
                 WHEN attempts >= max_attempts THEN NOW()
                 ELSE NULL
             END,
             run_at = CASE
                 WHEN attempts < max_attempts THEN NOW() + ($3 * INTERVAL '1 millisecond')
                 ELSE run_at
             END,
             started_at = NULL,
             error = $2
             WHERE id = $1",
        )
        .bind::<diesel::sql_types::Uuid, _>(job_id)
        .bind::<diesel::sql_types::Text, _>(error)
        .bind::<diesel::sql_types::BigInt, _>(retry_delay.as_millis().min(i64::MAX as u128) as i64)
        .execute(&mut conn)
        .map_err(|e| AppError::DatabaseError(format!("Failed to mark job as failed: {}", e)))?;

        Ok(())
    }

    async fn get_by_id(&self, job_id: Uuid) -> AppResult<Option<JobRecord>> {
        let mut conn = self.get_conn()?;

        let job: Option<RecommendationJobModel> = recommendation_jobs::table
            .find(job_id)
            .select(RecommendationJobModel::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get job by id: {}", e)))?;

        Ok(job.map(|j| j.to_job_record()))
    }

    async fn get_pending_jobs(&self) -> AppResult<Vec<JobRecord>> {
        let mut conn = self.get_conn()?;

        let jobs: Vec<RecommendationJobModel> = recommendation_jobs::table
            .filter(recommendation_jobs::status.eq(JobStatusDb::Pending))
            .order(recommendation_jobs::created_at.asc())
            .select(RecommendationJobModel::as_select())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to get pending jobs: {}", e)))?;

        Ok(jobs.into_iter().map(|j| j.to_job_record()).collect())
    }

    async fn get_statistics(&self) -> AppResult<JobStatistics> {
        let mut conn = self.get_conn()?;

        let pending = Self::count_with_status(&mut conn, "pending")?;
        let running = Self::count_with_status(&mut conn, "running")?;
        let completed = Self::count_with_status(&mut conn, "completed")?;
        let failed = Self::count_with_status(&mut conn, "failed")?;

        let total: CountResult =
            diesel::sql_query("SELECT COUNT(*) as count FROM recommendation_jobs")
                .get_result(&mut conn)
                .map_err(|e| AppError::DatabaseError(format!("Failed to count total: {}", e)))?;

        Ok(JobStatistics {
            pending_count: pending,
            running_count: running,
            completed_count: completed,
            failed_count: failed,
            total_count: total.count,
        })
    }
}
