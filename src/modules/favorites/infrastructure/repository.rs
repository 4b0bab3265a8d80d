/// Diesel-based implementation of FavoriteRepository
use crate::modules::favorites::domain::entities::FavoriteMovie;
use crate::modules::favorites::domain::repository::FavoriteRepository;
use crate::modules::favorites::infrastructure::models::{FavoriteMovieModel, NewFavoriteMovie};
use crate::schema::{favorite_movies, movies};
use crate::shared::database::{DbConnection, DbPool};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

pub struct FavoriteRepositoryImpl {
    pool: DbPool,
}

impl FavoriteRepositoryImpl {
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
impl FavoriteRepository for FavoriteRepositoryImpl {
    async fn add(&self, user_id: i32, movie_id: Uuid) -> AppResult<FavoriteMovie> {
        let mut conn = self.get_conn()?;

        let new_favorite = NewFavoriteMovie { user_id, movie_id };
        diesel::insert_into(favorite_movies::table)
            .values(&new_favorite)
            .on_conflict((favorite_movies::user_id, favorite_movies::movie_id))
            .do_nothing()
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to add favorite: {}", e)))?;

        let model: FavoriteMovieModel = favorite_movies::table
            .filter(favorite_movies::user_id.eq(user_id))
            .filter(favorite_movies::movie_id.eq(movie_id))
            .select(FavoriteMovieModel::as_select())
            .first(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to load favorite: {}", e)))?;

        Ok(model.to_domain())
    }

    async fn remove(&self, user_id: i32, movie_id: Uuid) -> AppResult<bool> {
        let mut conn = self.get_conn()?;

        let deleted = diesel::delete(
            favorite_movies::table
                .filter(favorite_movies::user_id.eq(user_id))
                .filter(favorite_movies::movie_id.eq(movie_id)),
        )
        .execute(&mut conn)
        .map_err(|e| AppError::DatabaseError(format!("Failed to remove favorite: {}", e)))?;

        Ok(deleted > 0)
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<FavoriteMovie>> {
        let mut conn = self.get_conn()?;

        let rows: Vec<FavoriteMovieModel> = favorite_movies::table
            .filter(favorite_movies::user_id.eq(user_id))
            .order(favorite_movies::created_at.asc())
            .select(FavoriteMovieModel::as_select())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to list favorites: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn titles_for_user(&self, user_id: i32) -> AppResult<Vec<String>> {
        let mut conn = self.get_conn()?;

        let titles: Vec<String> = favorite_movies::table
            .inner_join(movies::table)
            .filter(favorite_movies::user_id.eq(user_id))
            .order(favorite_movies::created_at.asc())
            .select(movies::title)
            .load(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to load favorite titles: {}", e))
            })?;

        Ok(titles)
    }
}
