/// Repository trait for canonical movie persistence
use crate::modules::catalog::domain::entities::{CatalogGenre, CatalogMovieDetail, Genre, Movie};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Find-or-create by `tmdb_id`. Concurrent callers for the same catalog
    /// id must converge on one row (unique constraint + ON CONFLICT, no
    /// application-level lock).
    async fn find_or_create_movie(&self, detail: &CatalogMovieDetail) -> AppResult<Movie>;

    /// Find-or-create by genre `tmdb_id`.
    async fn find_or_create_genre(&self, genre: &CatalogGenre) -> AppResult<Genre>;

    /// Record the (movie, genre) pair; duplicate links are silently kept
    /// unique.
    async fn link_movie_genre(&self, movie_id: Uuid, genre_id: Uuid) -> AppResult<()>;

    async fn get_by_tmdb_id(&self, tmdb_id: i32) -> AppResult<Option<Movie>>;
}
