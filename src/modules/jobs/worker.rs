/// Background worker for recommendation recalculation jobs
///
/// Continuously polls the durable queue and drives the recommendation
/// calculator. Lifecycle transitions are mirrored into the queue status
/// tracker; failures rely on the queue's attempt/backoff policy instead of
/// a worker-local retry loop.
use crate::modules::jobs::domain::entities::{JobRecord, RECALCULATE_RECOMMENDATIONS};
use crate::modules::jobs::domain::repository::JobRepository;
use crate::modules::jobs::domain::status::{QueuePhase, QueueStatusRepository};
use crate::modules::recommendation::application::calculator::RecommendationCalculator;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_error, log_info, log_warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct RecommendationWorker {
    job_repository: Arc<dyn JobRepository>,
    status_repository: Arc<dyn QueueStatusRepository>,
    calculator: Arc<RecommendationCalculator>,
    poll_interval: Duration,
    job_timeout: Duration,
    is_running: Arc<tokio::sync::RwLock<bool>>,
}

impl RecommendationWorker {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        status_repository: Arc<dyn QueueStatusRepository>,
        calculator: Arc<RecommendationCalculator>,
    ) -> Self {
        Self {
            job_repository,
            status_repository,
            calculator,
            poll_interval: Duration::from_secs(5),
            job_timeout: Duration::from_secs(120),
            is_running: Arc::new(tokio::sync::RwLock::new(false)),
        }
    }

    pub fn with_timing(mut self, poll_interval: Duration, job_timeout: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.job_timeout = job_timeout;
        self
    }

    /// Spawn the worker loop onto the runtime.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    /// Run the worker loop until `stop` is called.
    pub async fn run(self: Arc<Self>) {
        log_info!("Recommendation worker started");

        {
            let mut running = self.is_running.write().await;
            *running = true;
        }

        loop {
            {
                let running = self.is_running.read().await;
                if !*running {
                    log_info!("Recommendation worker stopped");
                    break;
                }
            }

            match self.process_next_job().await {
                Ok(processed) => {
                    if !processed {
                        // No jobs available, sleep before next poll
                        tokio::time::sleep(self.poll_interval).await;
                    }
                    // If a job was processed, immediately try the next one
                }
                Err(e) => {
                    log_error!("Error in worker loop: {}", e);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    pub async fn stop(&self) {
        let mut running = self.is_running.write().await;
        *running = false;
        log_info!("Recommendation worker stop requested");
    }

    /// Process the next job in the queue
    ///
    /// Returns true if a job was processed, false if the queue was empty.
    pub async fn process_next_job(&self) -> AppResult<bool> {
        let job = match self.job_repository.dequeue().await? {
            Some(job) => job,
            None => return Ok(false),
        };

        log_info!(
            "Processing job {} (name: {}, attempts: {}/{})",
            job.id,
            job.job_name,
            job.attempts,
            job.max_attempts
        );

        let started = Instant::now();

        let result = if job.job_name == RECALCULATE_RECOMMENDATIONS {
            self.handle_recalculate_job(&job).await
        } else {
            Err(AppError::ValidationError(format!(
                "Unknown job name: {}",
                job.job_name
            )))
        };

        match result {
            Ok(_) => {
                self.job_repository.mark_completed(job.id).await?;

                let elapsed_secs = started.elapsed().as_secs().min(i32::MAX as u64) as i32;
                self.status_repository
                    .advance(job.id, QueuePhase::Done, Some(elapsed_secs))
                    .await?;

                log_info!(
                    "Job {} completed successfully in {}s",
                    job.id,
                    elapsed_secs
                );
            }
            Err(e) => {
                let error_msg = format!("{}", e);
                log_warn!("Job {} failed: {}", job.id, error_msg);

                let retry_delay = job.backoff_policy().delay_for_attempt(job.attempts);
                self.job_repository
                    .mark_failed(job.id, &error_msg, retry_delay)
                    .await?;

                if job.can_retry() {
                    log_info!(
                        "Job {} will be redelivered in {:?} (attempt {}/{})",
                        job.id,
                        retry_delay,
                        job.attempts,
                        job.max_attempts
                    );
                } else {
                    log_error!(
                        "Job {} abandoned after {} attempts: {}",
                        job.id,
                        job.attempts,
                        error_msg
                    );
                    self.status_repository
                        .advance(job.id, QueuePhase::Failed, None)
                        .await?;
                }
            }
        }

        Ok(true)
    }

    async fn handle_recalculate_job(&self, job: &JobRecord) -> AppResult<()> {
        let payload = job.parse_recalculate_payload().map_err(|e| {
            AppError::ValidationError(format!("Invalid recalculation payload: {}", e))
        })?;

        self.status_repository
            .advance(job.id, QueuePhase::Processing, None)
            .await?;

        log_debug!(
            "Recalculating recommendations for user {} (job {})",
            payload.user_id,
            job.id
        );

        // The enqueue time marks the favorites snapshot this run represents;
        // the replace step uses it to let the freshest run win.
        let calculation = self.calculator.calculate(payload.user_id, job.created_at);

        match tokio::time::timeout(self.job_timeout, calculation).await {
            Ok(result) => result.map(|_| ()),
            Err(_) => Err(AppError::InternalError(format!(
                "Job {} exceeded the {}s wall-clock budget",
                job.id,
                self.job_timeout.as_secs()
            ))),
        }
    }
}
