/// Diesel models for the recommendation_jobs and queue_status tables
use crate::modules::jobs::domain::entities::JobRecord;
use crate::modules::jobs::domain::status::{QueuePhase, QueueStatusRecord};
use crate::modules::jobs::domain::value_objects::{JobStatusDb, QueuePhaseDb};
use crate::schema::{queue_status, recommendation_jobs};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Diesel model for inserting new jobs
#[derive(Insertable, Debug)]
#[diesel(table_name = recommendation_jobs)]
pub struct NewJob {
    pub job_name: String,
    pub payload: JsonValue,
    pub max_attempts: i32,
    pub backoff_kind: String,
    pub backoff_delay_ms: i32,
}

/// Diesel model for querying existing jobs
#[derive(Queryable, Selectable, QueryableByName, Debug, Clone)]
#[diesel(table_name = recommendation_jobs)]
pub struct RecommendationJobModel {
    pub id: Uuid,
    pub job_name: String,
    pub payload: JsonValue,
    pub status: JobStatusDb,
    pub attempts: i32,
    pub max_attempts: i32,
    pub backoff_kind: String,
    pub backoff_delay_ms: i32,
    pub run_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl RecommendationJobModel {
    /// Convert to domain JobRecord
    pub fn to_job_record(self) -> JobRecord {
        JobRecord {
            id: self.id,
            job_name: self.job_name,
            payload: self.payload,
            status: self.status.to_string(),
            attempts: self.attempts,
            max_attempts: self.max_attempts,
            backoff_kind: self.backoff_kind,
            backoff_delay_ms: self.backoff_delay_ms,
            run_at: self.run_at,
            created_at: self.created_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
            error: self.error,
        }
    }
}

/// Diesel model for inserting queue status rows
#[derive(Insertable, Debug)]
#[diesel(table_name = queue_status)]
pub struct NewQueueStatus {
    pub job_id: Uuid,
    pub user_id: i32,
    pub status: QueuePhaseDb,
}

/// Diesel model for querying queue status rows
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = queue_status)]
pub struct QueueStatusModel {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: i32,
    pub status: QueuePhaseDb,
    pub processing_time_secs: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QueueStatusModel {
    pub fn to_record(self) -> QueueStatusRecord {
        QueueStatusRecord {
            id: self.id,
            job_id: self.job_id,
            user_id: self.user_id,
            status: phase_from_db(self.status),
            processing_time_secs: self.processing_time_secs,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub fn phase_from_db(db: QueuePhaseDb) -> QueuePhase {
    match db {
        QueuePhaseDb::Queued => QueuePhase::Queued,
        QueuePhaseDb::Processing => QueuePhase::Processing,
        QueuePhaseDb::Done => QueuePhase::Done,
        QueuePhaseDb::Failed => QueuePhase::Failed,
    }
}

pub fn phase_to_db(phase: QueuePhase) -> QueuePhaseDb {
    match phase {
        QueuePhase::Queued => QueuePhaseDb::Queued,
        QueuePhase::Processing => QueuePhaseDb::Processing,
        QueuePhase::Done => QueuePhaseDb::Done,
        QueuePhase::Failed => QueuePhaseDb::Failed,
    }
}
