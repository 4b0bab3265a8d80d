/// Repository trait for favorite persistence
use crate::modules::favorites::domain::entities::FavoriteMovie;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Find-or-create the (user, movie) pair.
    async fn add(&self, user_id: i32, movie_id: Uuid) -> AppResult<FavoriteMovie>;

    /// Remove the pair. Returns whether a row existed.
    async fn remove(&self, user_id: i32, movie_id: Uuid) -> AppResult<bool>;

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<FavoriteMovie>>;

    /// Titles of the user's favorited movies, joined through the movies
    /// table. This is what the prompt is built from.
    async fn titles_for_user(&self, user_id: i32) -> AppResult<Vec<String>>;
}
