/// Favorite service
///
/// Applies the favorite mutation, then enqueues one recalculation job and
/// creates its queue status record. The mutation commits even if a later
/// duplicate enqueue happens; redundant recalculation is harmless because
/// the replace step keeps only the freshest result.
use crate::modules::favorites::domain::entities::FavoriteMovie;
use crate::modules::favorites::domain::repository::FavoriteRepository;
use crate::modules::jobs::domain::entities::{EnqueueOptions, Job, JobRecord};
use crate::modules::jobs::domain::repository::JobRepository;
use crate::modules::jobs::domain::status::QueueStatusRepository;
use crate::{log_debug, log_info};
use crate::shared::errors::AppResult;
use std::sync::Arc;
use uuid::Uuid;

pub struct FavoriteService {
    favorites: Arc<dyn FavoriteRepository>,
    jobs: Arc<dyn JobRepository>,
    statuses: Arc<dyn QueueStatusRepository>,
    enqueue_options: EnqueueOptions,
}

impl FavoriteService {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        jobs: Arc<dyn JobRepository>,
        statuses: Arc<dyn QueueStatusRepository>,
    ) -> Self {
        Self {
            favorites,
            jobs,
            statuses,
            enqueue_options: EnqueueOptions::default(),
        }
    }

    pub fn with_enqueue_options(mut self, options: EnqueueOptions) -> Self {
        self.enqueue_options = options;
        self
    }

    pub async fn add_favorite(&self, user_id: i32, movie_id: Uuid) -> AppResult<FavoriteMovie> {
        let favorite = self.favorites.add(user_id, movie_id).await?;
        log_info!("User {} favorited movie {}", user_id, movie_id);

        self.enqueue_recalculation(user_id).await?;
        Ok(favorite)
    }

    pub async fn remove_favorite(&self, user_id: i32, movie_id: Uuid) -> AppResult<bool> {
        let removed = self.favorites.remove(user_id, movie_id).await?;
        log_info!(
            "User {} unfavorited movie {} (existed: {})",
            user_id,
            movie_id,
            removed
        );

        self.enqueue_recalculation(user_id).await?;
        Ok(removed)
    }

    /// Enqueue one recalculation job and mirror it in the status tracker.
    pub async fn enqueue_recalculation(&self, user_id: i32) -> AppResult<JobRecord> {
        let job = Job::recalculate_recommendations(user_id, self.enqueue_options);
        let record = self.jobs.enqueue(job).await?;
        self.statuses.create(record.id, user_id).await?;

        log_debug!(
            "Enqueued recalculation job {} for user {}",
            record.id,
            user_id
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::favorites::domain::repository::MockFavoriteRepository;
    use crate::modules::jobs::domain::repository::MockJobRepository;
    use crate::modules::jobs::domain::status::{MockQueueStatusRepository, QueuePhase, QueueStatusRecord};
    use crate::modules::jobs::domain::entities::RECALCULATE_RECOMMENDATIONS;
    use chrono::Utc;

    fn job_record_for(job: &Job) -> JobRecord {
        JobRecord {
            id: Uuid::new_v4(),
            job_name: job.job_name.clone(),
            payload: job.payload.clone(),
            status: "pending".to_string(),
            attempts: 0,
            max_attempts: job.max_attempts,
            backoff_kind: job.backoff.kind.to_string(),
            backoff_delay_ms: job.backoff.delay.as_millis() as i32,
            run_at: Utc::now(),
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            error: None,
        }
    }

    #[tokio::test]
    async fn add_favorite_enqueues_one_job_with_status_record() {
        let user_id = 7;
        let movie_id = Uuid::new_v4();

        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_add().times(1).returning(|user_id, movie_id| {
            Ok(FavoriteMovie {
                id: Uuid::new_v4(),
                user_id,
                movie_id,
                created_at: Utc::now(),
            })
        });

        let mut jobs = MockJobRepository::new();
        jobs.expect_enqueue()
            .times(1)
            .withf(|job| job.job_name == RECALCULATE_RECOMMENDATIONS)
            .returning(|job| Ok(job_record_for(&job)));

        let mut statuses = MockQueueStatusRepository::new();
        statuses
            .expect_create()
            .times(1)
            .withf(move |_, uid| *uid == user_id)
            .returning(|job_id, user_id| {
                Ok(QueueStatusRecord {
                    id: Uuid::new_v4(),
                    job_id,
                    user_id,
                    status: QueuePhase::Queued,
                    processing_time_secs: 0,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = FavoriteService::new(
            Arc::new(favorites),
            Arc::new(jobs),
            Arc::new(statuses),
        );

        let favorite = service.add_favorite(user_id, movie_id).await.unwrap();
        assert_eq!(favorite.user_id, user_id);
    }

    #[tokio::test]
    async fn remove_favorite_enqueues_even_when_row_missing() {
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_remove().times(1).returning(|_, _| Ok(false));

        let mut jobs = MockJobRepository::new();
        jobs.expect_enqueue()
            .times(1)
            .returning(|job| Ok(job_record_for(&job)));

        let mut statuses = MockQueueStatusRepository::new();
        statuses.expect_create().times(1).returning(|job_id, user_id| {
            Ok(QueueStatusRecord {
                id: Uuid::new_v4(),
                job_id,
                user_id,
                status: QueuePhase::Queued,
                processing_time_secs: 0,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let service = FavoriteService::new(
            Arc::new(favorites),
            Arc::new(jobs),
            Arc::new(statuses),
        );

        let removed = service.remove_favorite(3, Uuid::new_v4()).await.unwrap();
        assert!(!removed);
    }
}
