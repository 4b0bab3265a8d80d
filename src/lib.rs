pub mod modules;
pub mod schema;
pub mod shared;

use modules::{
    catalog::{
        application::resolver::CatalogResolver, infrastructure::persistence::MovieRepositoryImpl,
        infrastructure::tmdb::TmdbClient, CatalogProvider, MovieRepository,
    },
    favorites::{
        application::service::FavoriteService, infrastructure::repository::FavoriteRepositoryImpl,
        FavoriteRepository,
    },
    jobs::{
        infrastructure::{JobRepositoryImpl, QueueStatusRepositoryImpl},
        worker::RecommendationWorker,
        JobRepository, QueueStatusRepository,
    },
    recommendation::{
        application::calculator::RecommendationCalculator,
        infrastructure::completion::OpenAiClient,
        infrastructure::persistence::RecommendationRepositoryImpl, CompletionProvider,
        RecommendationRepository,
    },
};
use shared::{Config, Database};
use std::sync::Arc;

/// Fully wired pipeline services.
///
/// The worker consumes the durable queue; the favorite service is the
/// enqueue side handed to whatever surface receives favorite mutations.
pub struct AppServices {
    pub favorite_service: Arc<FavoriteService>,
    pub worker: Arc<RecommendationWorker>,
    pub job_repository: Arc<JobRepositoryImpl>,
    pub status_repository: Arc<QueueStatusRepositoryImpl>,
}

/// Wire repositories, external adapters, calculator and worker against the
/// given database.
pub fn build_services(config: &Config, database: &Database) -> AppServices {
    let pool = database.pool().clone();

    let movie_repo: Arc<dyn MovieRepository> = Arc::new(MovieRepositoryImpl::new(pool.clone()));
    let favorite_repo: Arc<dyn FavoriteRepository> =
        Arc::new(FavoriteRepositoryImpl::new(pool.clone()));
    let recommendation_repo: Arc<dyn RecommendationRepository> =
        Arc::new(RecommendationRepositoryImpl::new(pool.clone()));
    let job_repository = Arc::new(JobRepositoryImpl::new(pool.clone()));
    let status_repository = Arc::new(QueueStatusRepositoryImpl::new(pool));

    let catalog: Arc<dyn CatalogProvider> = Arc::new(TmdbClient::new(
        config.tmdb_base_url.clone(),
        config.tmdb_api_key.clone(),
    ));
    let completion: Arc<dyn CompletionProvider> = Arc::new(OpenAiClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));

    let resolver = Arc::new(CatalogResolver::new(catalog, movie_repo));
    let calculator = Arc::new(RecommendationCalculator::new(
        favorite_repo.clone(),
        completion,
        resolver,
        recommendation_repo,
    ));

    let worker = Arc::new(
        RecommendationWorker::new(
            job_repository.clone() as Arc<dyn JobRepository>,
            status_repository.clone() as Arc<dyn QueueStatusRepository>,
            calculator,
        )
        .with_timing(config.worker_poll_interval, config.job_timeout),
    );

    let favorite_service = Arc::new(FavoriteService::new(
        favorite_repo,
        job_repository.clone() as Arc<dyn JobRepository>,
        status_repository.clone() as Arc<dyn QueueStatusRepository>,
    ));

    AppServices {
        favorite_service,
        worker,
        job_repository,
        status_repository,
    }
}
