/// Diesel-based implementation of MovieRepository
///
/// Every write is INSERT .. ON CONFLICT DO NOTHING followed by a read of
/// the surviving row, so concurrent materialization of the same catalog id
/// converges without locks.
use crate::modules::catalog::domain::entities::{CatalogGenre, CatalogMovieDetail, Genre, Movie};
use crate::modules::catalog::domain::repository::MovieRepository;
use crate::modules::catalog::infrastructure::models::{GenreModel, MovieModel, NewGenre, NewMovie};
use crate::schema::{genres, movie_genres, movies};
use crate::shared::database::{DbConnection, DbPool};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

pub struct MovieRepositoryImpl {
    pool: DbPool,
}

impl MovieRepositoryImpl {
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
impl MovieRepository for MovieRepositoryImpl {
    async fn find_or_create_movie(&self, detail: &CatalogMovieDetail) -> AppResult<Movie> {
        let mut conn = self.get_conn()?;

        let new_movie = NewMovie::from_detail(detail);
        diesel::insert_into(movies::table)
            .values(&new_movie)
            .on_conflict(movies::tmdb_id)
            .do_nothing()
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert movie: {}", e)))?;

        let model: MovieModel = movies::table
            .filter(movies::tmdb_id.eq(detail.tmdb_id))
            .select(MovieModel::as_select())
            .first(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!(
                    "Failed to load movie tmdb_id {}: {}",
                    detail.tmdb_id, e
                ))
            })?;

        Ok(model.to_domain())
    }

    async fn find_or_create_genre(&self, genre: &CatalogGenre) -> AppResult<Genre> {
        let mut conn = self.get_conn()?;

        let new_genre = NewGenre::from_catalog(genre);
        diesel::insert_into(genres::table)
            .values(&new_genre)
            .on_conflict(genres::tmdb_id)
            .do_nothing()
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert genre: {}", e)))?;

        let model: GenreModel = genres::table
            .filter(genres::tmdb_id.eq(genre.tmdb_id))
            .select(GenreModel::as_select())
            .first(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!(
                    "Failed to load genre tmdb_id {}: {}",
                    genre.tmdb_id, e
                ))
            })?;

        Ok(model.to_domain())
    }

    async fn link_movie_genre(&self, movie_id: Uuid, genre_id: Uuid) -> AppResult<()> {
        let mut conn = self.get_conn()?;

        diesel::insert_into(movie_genres::table)
            .values((
                movie_genres::movie_id.eq(movie_id),
                movie_genres::genre_id.eq(genre_id),
            ))
            .on_conflict((movie_genres::movie_id, movie_genres::genre_id))
            .do_nothing()
            .execute(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to link movie to genre: {}", e))
            })?;

        Ok(())
    }

    async fn get_by_tmdb_id(&self, tmdb_id: i32) -> AppResult<Option<Movie>> {
        let mut conn = self.get_conn()?;

        let model: Option<MovieModel> = movies::table
            .filter(movies::tmdb_id.eq(tmdb_id))
            .select(MovieModel::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get movie: {}", e)))?;

        Ok(model.map(|m| m.to_domain()))
    }
}
