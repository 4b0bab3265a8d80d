/// Domain entities for the durable job queue
///
/// Jobs represent one unit of "recalculate recommendations for user U",
/// enqueued whenever the user's favorites change and processed by the
/// background worker.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Fixed job name for recommendation recalculation
pub const RECALCULATE_RECOMMENDATIONS: &str = "recommendation.recalculate";

/// Job status enum matching database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(format!("Invalid job status: {}", s)),
        }
    }
}

/// Delay shape applied between redelivery attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    Fixed,
    Exponential,
}

impl std::fmt::Display for BackoffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackoffKind::Fixed => write!(f, "fixed"),
            BackoffKind::Exponential => write!(f, "exponential"),
        }
    }
}

impl std::str::FromStr for BackoffKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(BackoffKind::Fixed),
            "exponential" => Ok(BackoffKind::Exponential),
            _ => Err(format!("Invalid backoff kind: {}", s)),
        }
    }
}

/// Redelivery delay policy for a failed job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub kind: BackoffKind,
    pub delay: Duration,
}

/// Cap on a single redelivery delay, regardless of policy.
const MAX_BACKOFF: Duration = Duration::from_secs(15 * 60);

impl BackoffPolicy {
    pub fn fixed(delay: Duration) -> Self {
        Self {
            kind: BackoffKind::Fixed,
            delay,
        }
    }

    pub fn exponential(delay: Duration) -> Self {
        Self {
            kind: BackoffKind::Exponential,
            delay,
        }
    }

    /// Delay before redelivering after the given failed attempt
    /// (1-based: attempt 1 is the first execution).
    pub fn delay_for_attempt(&self, attempt: i32) -> Duration {
        let attempt = attempt.max(1);
        let delay = match self.kind {
            BackoffKind::Fixed => self.delay,
            BackoffKind::Exponential => {
                let factor = 2u32.saturating_pow((attempt - 1).min(30) as u32);
                self.delay.saturating_mul(factor)
            }
        };
        delay.min(MAX_BACKOFF)
    }
}

impl Default for BackoffPolicy {
    /// Matches the enqueue options of the triggering service: exponential
    /// starting at 2 seconds.
    fn default() -> Self {
        Self::exponential(Duration::from_millis(2000))
    }
}

/// Options accepted at enqueue time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnqueueOptions {
    pub max_attempts: i32,
    pub backoff: BackoffPolicy,
}

impl Default for EnqueueOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: BackoffPolicy::default(),
        }
    }
}

/// Payload for recalculation jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculatePayload {
    pub user_id: i32,
}

/// New job to be queued (before insertion to database)
#[derive(Debug, Clone)]
pub struct Job {
    pub job_name: String,
    pub payload: serde_json::Value,
    pub max_attempts: i32,
    pub backoff: BackoffPolicy,
}

impl Job {
    /// Create a recalculation job for the given user
    pub fn recalculate_recommendations(user_id: i32, options: EnqueueOptions) -> Self {
        let payload = RecalculatePayload { user_id };
        Self {
            job_name: RECALCULATE_RECOMMENDATIONS.to_string(),
            payload: serde_json::to_value(payload)
                .unwrap_or_else(|_| serde_json::json!({ "user_id": user_id })),
            max_attempts: options.max_attempts.max(1),
            backoff: options.backoff,
        }
    }
}

/// Job record from database (with metadata)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub job_name: String,
    pub payload: serde_json::Value,
    pub status: String,
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

impl JobRecord {
    pub fn parse_status(&self) -> Result<JobStatus, String> {
        self.status.parse()
    }

    /// Check if job can be retried
    pub fn can_retry(&self) -> bool {
        self.attempts < self.max_attempts
    }

    pub fn parse_recalculate_payload(&self) -> Result<RecalculatePayload, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }

    /// Reconstruct the backoff policy stored with the job. An unknown kind
    /// falls back to the default policy.
    pub fn backoff_policy(&self) -> BackoffPolicy {
        let delay = Duration::from_millis(self.backoff_delay_ms.max(0) as u64);
        match self.backoff_kind.parse::<BackoffKind>() {
            Ok(BackoffKind::Fixed) => BackoffPolicy::fixed(delay),
            Ok(BackoffKind::Exponential) => BackoffPolicy::exponential(delay),
            Err(_) => BackoffPolicy::default(),
        }
    }
}
