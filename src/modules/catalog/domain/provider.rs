/// Boundary to the external movie catalog
///
/// Adapters translate wire payloads into the typed domain structures before
/// anything downstream touches them.
use crate::modules::catalog::domain::entities::{CatalogMovieDetail, CatalogMovieSummary};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Free-text title search. An empty result list is a valid answer,
    /// not an error.
    async fn search_movies(&self, query: &str) -> AppResult<Vec<CatalogMovieSummary>>;

    /// Full detail for a single catalog id. Fails with `AppError::NotFound`
    /// when the catalog has no such id, and with an upstream error variant
    /// for any other transport/HTTP failure.
    async fn movie_detail(&self, tmdb_id: i32) -> AppResult<CatalogMovieDetail>;
}
