/// Diesel-based implementation of the queue status tracker
use crate::modules::jobs::domain::status::{QueuePhase, QueueStatusRecord, QueueStatusRepository};
use crate::modules::jobs::infrastructure::models::{
    phase_from_db, phase_to_db, NewQueueStatus, QueueStatusModel,
};
use crate::modules::jobs::domain::value_objects::QueuePhaseDb;
use crate::schema::queue_status;
use crate::shared::database::{DbConnection, DbPool};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

pub struct QueueStatusRepositoryImpl {
    pool: DbPool,
}

impl QueueStatusRepositoryImpl {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
    }

    fn load_by_job_id(
        conn: &mut DbConnection,
        job_id: Uuid,
    ) -> AppResult<Option<QueueStatusModel>> {
        queue_status::table
            .filter(queue_status::job_id.eq(job_id))
            .select(QueueStatusModel::as_select())
            .first(conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to load queue status: {}", e)))
    }
}

#[async_trait]
impl QueueStatusRepository for QueueStatusRepositoryImpl {
    async fn create(&self, job_id: Uuid, user_id: i32) -> AppResult<QueueStatusRecord> {
        let mut conn = self.get_conn()?;

        let new_record = NewQueueStatus {
            job_id,
            user_id,
            status: QueuePhaseDb::Queued,
        };

        let inserted: QueueStatusModel = diesel::insert_into(queue_status::table)
            .values(&new_record)
            .get_result(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to create queue status: {}", e))
            })?;

        Ok(inserted.to_record())
    }

    async fn advance(
        &self,
        job_id: Uuid,
        phase: QueuePhase,
        processing_time_secs: Option<i32>,
    ) -> AppResult<Option<QueueStatusRecord>> {
        let mut conn = self.get_conn()?;

        let current = match Self::load_by_job_id(&mut conn, job_id)? {
            Some(record) => record,
            None => {
                log::warn!(
                    "Queue status advance for unknown job {} to {} ignored",
                    job_id,
                    phase
                );
                return Ok(None);
            }
        };

        let current_phase = phase_from_db(current.status);
        if !current_phase.can_advance_to(phase) {
            log::warn!(
                "Queue status regression for job {} ({} -> {}) ignored",
                job_id,
                current_phase,
                phase
            );
            return Ok(None);
        }

        let updated: QueueStatusModel = match processing_time_secs {
            Some(secs) => diesel::update(queue_status::table.filter(queue_status::job_id.eq(job_id)))
                .set((
                    queue_status::status.eq(phase_to_db(phase)),
                    queue_status::processing_time_secs.eq(secs),
                ))
                .get_result(&mut conn),
            None => diesel::update(queue_status::table.filter(queue_status::job_id.eq(job_id)))
                .set(queue_status::status.eq(phase_to_db(phase)))
                .get_result(&mut conn),
        }
        .map_err(|e| AppError::DatabaseError(format!("Failed to advance queue status: {}", e)))?;

        log::info!(
            "Queue status for job {} advanced to {} (user {})",
            job_id,
            phase,
            updated.user_id
        );

        Ok(Some(updated.to_record()))
    }

    async fn get_by_job_id(&self, job_id: Uuid) -> AppResult<Option<QueueStatusRecord>> {
        let mut conn = self.get_conn()?;
        Ok(Self::load_by_job_id(&mut conn, job_id)?.map(|m| m.to_record()))
    }
}
