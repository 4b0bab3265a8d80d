/// Diesel-based implementation of RecommendationRepository
///
/// The replace step runs in one transaction guarded by a per-user
/// generation row: the row is locked, the stored snapshot compared, and
/// only a run with a fresher favorites snapshot may delete-and-insert.
/// Stale runs and empty result sets leave the stored rows untouched.
use crate::modules::recommendation::domain::entities::{
    MaterializedRecommendation, Recommendation, ReplaceOutcome,
};
use crate::modules::recommendation::domain::repository::RecommendationRepository;
use crate::modules::recommendation::infrastructure::models::{
    NewGeneration, NewRecommendation, RecommendationModel,
};
use crate::schema::{recommendation_generations, recommendations};
use crate::shared::database::{DbConnection, DbPool};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use diesel::prelude::*;

pub struct RecommendationRepositoryImpl {
    pool: DbPool,
}

impl RecommendationRepositoryImpl {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
    }
}

#[async_trait]
impl RecommendationRepository for RecommendationRepositoryImpl {
    async fn replace_for_user(
        &self,
        user_id: i32,
        recs: &[MaterializedRecommendation],
        snapshot_at: DateTime<Utc>,
    ) -> AppResult<ReplaceOutcome> {
        let mut conn = self.get_conn()?;

        conn.transaction::<ReplaceOutcome, AppError, _>(|conn| {
            // Ensure the generation row exists, then lock it for the
            // duration of the replace.
            let seed = NewGeneration {
                user_id,
                committed_at: Utc.timestamp_opt(0, 0).unwrap(),
            };
            diesel::insert_into(recommendation_generations::table)
                .values(&seed)
                .on_conflict(recommendation_generations::user_id)
                .do_nothing()
                .execute(conn)?;

            let committed_at: DateTime<Utc> = recommendation_generations::table
                .filter(recommendation_generations::user_id.eq(user_id))
                .select(recommendation_generations::committed_at)
                .for_update()
                .first(conn)?;

            if committed_at >= snapshot_at {
                log::warn!(
                    "Recommendation replace for user {} skipped: snapshot {} is not newer than committed {}",
                    user_id,
                    snapshot_at,
                    committed_at
                );
                return Ok(ReplaceOutcome::StaleSkipped);
            }

            if recs.is_empty() {
                log::warn!(
                    "Recommendation replace for user {} produced no rows; keeping existing set",
                    user_id
                );
                return Ok(ReplaceOutcome::EmptyKept);
            }

            diesel::delete(recommendations::table.filter(recommendations::user_id.eq(user_id)))
                .execute(conn)?;

            // Two suggestions resolving to the same movie collapse to one
            // row via the (user_id, movie_id) unique pair.
            let mut stored = 0;
            for rec in recs {
                let new_row = NewRecommendation {
                    user_id,
                    movie_id: rec.movie.id,
                    reason: rec.reason.clone(),
                };
                stored += diesel::insert_into(recommendations::table)
                    .values(&new_row)
                    .on_conflict((recommendations::user_id, recommendations::movie_id))
                    .do_nothing()
                    .execute(conn)?;
            }

            diesel::update(
                recommendation_generations::table
                    .filter(recommendation_generations::user_id.eq(user_id)),
            )
            .set(recommendation_generations::committed_at.eq(snapshot_at))
            .execute(conn)?;

            Ok(ReplaceOutcome::Committed(stored))
        })
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Recommendation>> {
        let mut conn = self.get_conn()?;

        let rows: Vec<RecommendationModel> = recommendations::table
            .filter(recommendations::user_id.eq(user_id))
            .select(RecommendationModel::as_select())
            .load(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to list recommendations: {}", e))
            })?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }
}
