/// Queue status tracker tests - database operations
///
/// Tests cover:
/// - Record creation at enqueue time
/// - Monotonic advance with processing time
/// - Unknown job ids and regressions as warning no-ops
mod utils;

use cinerec::modules::jobs::domain::status::{QueuePhase, QueueStatusRepository};
use cinerec::modules::jobs::infrastructure::QueueStatusRepositoryImpl;
use utils::db;
use uuid::Uuid;

fn repo() -> QueueStatusRepositoryImpl {
    let pool = db::get_test_db_pool();
    QueueStatusRepositoryImpl::new((*pool).clone())
}

#[tokio::test]
async fn create_starts_in_queued_phase() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let job_id = Uuid::new_v4();

    let record = repo.create(job_id, 42).await.unwrap();
    assert_eq!(record.job_id, job_id);
    assert_eq!(record.user_id, 42);
    assert_eq!(record.status, QueuePhase::Queued);
    assert_eq!(record.processing_time_secs, 0);
}

#[tokio::test]
async fn advance_walks_the_lifecycle() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let job_id = Uuid::new_v4();
    repo.create(job_id, 7).await.unwrap();

    let processing = repo
        .advance(job_id, QueuePhase::Processing, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(processing.status, QueuePhase::Processing);

    let done = repo
        .advance(job_id, QueuePhase::Done, Some(12))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, QueuePhase::Done);
    assert_eq!(done.processing_time_secs, 12);
}

#[tokio::test]
async fn advance_unknown_job_is_a_noop() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let result = repo
        .advance(Uuid::new_v4(), QueuePhase::Processing, None)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn done_record_never_regresses() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let job_id = Uuid::new_v4();
    repo.create(job_id, 3).await.unwrap();
    repo.advance(job_id, QueuePhase::Processing, None)
        .await
        .unwrap();
    repo.advance(job_id, QueuePhase::Done, Some(4)).await.unwrap();

    let regression = repo
        .advance(job_id, QueuePhase::Processing, None)
        .await
        .unwrap();
    assert!(regression.is_none());

    let record = repo.get_by_job_id(job_id).await.unwrap().unwrap();
    assert_eq!(record.status, QueuePhase::Done);
    assert_eq!(record.processing_time_secs, 4);
}

#[tokio::test]
async fn retry_reenters_processing() {
    let _guard = db::acquire_test_lock();
    db::clean_test_db();

    let repo = repo();
    let job_id = Uuid::new_v4();
    repo.create(job_id, 3).await.unwrap();
    repo.advance(job_id, QueuePhase::Processing, None)
        .await
        .unwrap();

    // A redelivered attempt sends processing again
    let reentry = repo
        .advance(job_id, QueuePhase::Processing, None)
        .await
        .unwrap();
    assert!(reentry.is_some());

    let failed = repo
        .advance(job_id, QueuePhase::Failed, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failed.status, QueuePhase::Failed);
}
