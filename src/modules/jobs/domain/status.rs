/// Queue status tracker
///
/// A persisted mirror of each job's lifecycle, kept as a historical record
/// for observability. Never deleted.
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle phase of a tracked job. Transitions are monotonic:
/// queued -> processing -> done | failed. Retried attempts may re-send
/// `processing`, which is accepted as a re-entry; `done` and `failed` are
/// final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueuePhase {
    Queued,
    Processing,
    Done,
    Failed,
}

impl QueuePhase {
    /// Ordering rank used for the monotonic guard.
    pub fn rank(&self) -> u8 {
        match self {
            QueuePhase::Queued => 0,
            QueuePhase::Processing => 1,
            QueuePhase::Done => 2,
            QueuePhase::Failed => 2,
        }
    }

    /// Whether moving from `self` to `next` is a legal advance.
    /// Re-entering `processing` on a retry is allowed.
    pub fn can_advance_to(&self, next: QueuePhase) -> bool {
        if *self == QueuePhase::Processing && next == QueuePhase::Processing {
            return true;
        }
        next.rank() > self.rank()
    }
}

impl std::fmt::Display for QueuePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueuePhase::Queued => write!(f, "queued"),
            QueuePhase::Processing => write!(f, "processing"),
            QueuePhase::Done => write!(f, "done"),
            QueuePhase::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for QueuePhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queued" => Ok(QueuePhase::Queued),
            "processing" => Ok(QueuePhase::Processing),
            "done" => Ok(QueuePhase::Done),
            "failed" => Ok(QueuePhase::Failed),
            _ => Err(format!("Invalid queue phase: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatusRecord {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_id: i32,
    pub status: QueuePhase,
    pub processing_time_secs: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueStatusRepository: Send + Sync {
    /// Create the tracking record for a freshly enqueued job
    /// (status `queued`).
    async fn create(&self, job_id: Uuid, user_id: i32) -> AppResult<QueueStatusRecord>;

    /// Advance the record. Unknown job ids and phase regressions are
    /// warning no-ops (returns None), never errors.
    async fn advance(
        &self,
        job_id: Uuid,
        phase: QueuePhase,
        processing_time_secs: Option<i32>,
    ) -> AppResult<Option<QueueStatusRecord>>;

    async fn get_by_job_id(&self, job_id: Uuid) -> AppResult<Option<QueueStatusRecord>>;
}
