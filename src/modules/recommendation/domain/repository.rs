/// Repository trait for recommendation persistence
use crate::modules::recommendation::domain::entities::{
    MaterializedRecommendation, Recommendation, ReplaceOutcome,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Replace the user's recommendation set in one transaction.
    ///
    /// `snapshot_at` is the favorites snapshot time of the run (the job's
    /// enqueue time). The replace only commits when no run with a fresher
    /// snapshot has already committed, so overlapping jobs for the same
    /// user converge on the newest result. An empty `recs` keeps the
    /// existing rows instead of wiping them.
    async fn replace_for_user(
        &self,
        user_id: i32,
        recs: &[MaterializedRecommendation],
        snapshot_at: DateTime<Utc>,
    ) -> AppResult<ReplaceOutcome>;

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Recommendation>>;
}
