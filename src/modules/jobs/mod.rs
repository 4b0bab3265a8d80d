/// Durable job queue for recommendation recalculation
///
/// Architecture:
/// - Domain: entities, backoff policy, repository traits and the queue
///   status tracker contract
/// - Infrastructure: Diesel-based queue and status tracker implementations
/// - Worker: background consumer driving the recommendation calculator
pub mod domain;
pub mod infrastructure;
pub mod worker;

// Re-exports for easy access
pub use domain::{
    entities::{
        BackoffKind, BackoffPolicy, EnqueueOptions, Job, JobRecord, JobStatus, RecalculatePayload,
        RECALCULATE_RECOMMENDATIONS,
    },
    repository::{JobRepository, JobStatistics},
    status::{QueuePhase, QueueStatusRecord, QueueStatusRepository},
};
pub use infrastructure::{JobRepositoryImpl, QueueStatusRepositoryImpl};
pub use worker::RecommendationWorker;
