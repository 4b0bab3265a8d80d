/// Job queue tests - database operations
///
/// Tests cover:
/// - Basic enqueue/dequeue operations
/// - Atomic dequeue with attempt counting
/// - Backoff scheduling on failure
/// - Terminal failure after exhausted attempts
mod utils;

use cinerec::modules::jobs::domain::{
    entities::{BackoffPolicy, EnqueueOptions, Job},
    repository::JobRepository,
};
use cinerec::modules::jobs::infrastructure::JobRepositoryImpl;
use std::time::Duration;
use utils::db;

fn repo() -> JobRepositoryImpl {
    let pool = db::get_test_db_pool();
    JobRepositoryImpl::new((*pool).clone())
}

#[tokio::test]
async fn enqueue_and_retrieve_job() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let job = Job::recalculate_recommendations(42, EnqueueOptions::default());

    let enqueued = repo.enqueue(job).await.unwrap();
    assert_eq!(enqueued.job_name, "recommendation.recalculate");
    assert_eq!(enqueued.status, "pending");
    assert_eq!(enqueued.max_attempts, 3);
    assert_eq!(enqueued.backoff_kind, "exponential");
    assert_eq!(enqueued.backoff_delay_ms, 2000);

    let payload = enqueued.parse_recalculate_payload().unwrap();
    assert_eq!(payload.user_id, 42);

    let retrieved = repo.get_by_id(enqueued.id).await.unwrap();
    assert!(retrieved.is_some());
    assert_eq!(retrieved.unwrap().id, enqueued.id);
}

#[tokio::test]
async fn dequeue_claims_pending_job_and_counts_attempt() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    repo.enqueue(Job::recalculate_recommendations(1, EnqueueOptions::default()))
        .await
        .unwrap();

    let dequeued = repo.dequeue().await.unwrap();
    assert!(dequeued.is_some());

    let job = dequeued.unwrap();
    assert_eq!(job.status, "running");
    assert_eq!(job.attempts, 1);

    // The claimed job is no longer eligible
    assert!(repo.dequeue().await.unwrap().is_none());
}

#[tokio::test]
async fn dequeue_empty_queue_returns_none() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    assert!(repo.dequeue().await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_enqueues_for_same_user_are_legal() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let first = repo
        .enqueue(Job::recalculate_recommendations(9, EnqueueOptions::default()))
        .await
        .unwrap();
    let second = repo
        .enqueue(Job::recalculate_recommendations(9, EnqueueOptions::default()))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(repo.get_pending_jobs().await.unwrap().len(), 2);
}

#[tokio::test]
async fn mark_completed_updates_status() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let enqueued = repo
        .enqueue(Job::recalculate_recommendations(5, EnqueueOptions::default()))
        .await
        .unwrap();

    repo.dequeue().await.unwrap();
    repo.mark_completed(enqueued.id).await.unwrap();

    let job = repo.get_by_id(enqueued.id).await.unwrap().unwrap();
    assert_eq!(job.status, "completed");
    assert!(job.completed_at.is_some());
}

#[tokio::test]
async fn failed_job_is_redelivered_after_backoff() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let options = EnqueueOptions {
        max_attempts: 3,
        backoff: BackoffPolicy::fixed(Duration::from_millis(50)),
    };
    let enqueued = repo
        .enqueue(Job::recalculate_recommendations(2, options))
        .await
        .unwrap();

    let claimed = repo.dequeue().await.unwrap().unwrap();
    repo.mark_failed(claimed.id, "catalog down", Duration::from_millis(50))
        .await
        .unwrap();

    let job = repo.get_by_id(enqueued.id).await.unwrap().unwrap();
    assert_eq!(job.status, "pending");
    assert_eq!(job.error.as_deref(), Some("catalog down"));

    // Not yet eligible until the backoff elapses
    tokio::time::sleep(Duration::from_millis(100)).await;
    let redelivered = repo.dequeue().await.unwrap().unwrap();
    assert_eq!(redelivered.id, enqueued.id);
    assert_eq!(redelivered.attempts, 2);
}

#[tokio::test]
async fn exhausted_attempts_mark_job_failed() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let options = EnqueueOptions {
        max_attempts: 1,
        backoff: BackoffPolicy::fixed(Duration::ZERO),
    };
    let enqueued = repo
        .enqueue(Job::recalculate_recommendations(8, options))
        .await
        .unwrap();

    let claimed = repo.dequeue().await.unwrap().unwrap();
    assert!(!claimed.can_retry());

    repo.mark_failed(claimed.id, "still failing", Duration::ZERO)
        .await
        .unwrap();

    let job = repo.get_by_id(enqueued.id).await.unwrap().unwrap();
    assert_eq!(job.status, "failed");
    assert!(job.completed_at.is_some());

    // Terminally failed jobs never come back
    assert!(repo.dequeue().await.unwrap().is_none());
}

#[tokio::test]
async fn statistics_count_by_status() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    repo.enqueue(Job::recalculate_recommendations(1, EnqueueOptions::default()))
        .await
        .unwrap();
    repo.enqueue(Job::recalculate_recommendations(2, EnqueueOptions::default()))
        .await
        .unwrap();
    let claimed = repo.dequeue().await.unwrap().unwrap();

    let stats = repo.get_statistics().await.unwrap();
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.running_count, 1);
    assert_eq!(stats.pending_count, 1);

    repo.mark_completed(claimed.id).await.unwrap();
    let stats = repo.get_statistics().await.unwrap();
    assert_eq!(stats.completed_count, 1);
}
