/// Diesel models for the movies, genres and movie_genres tables
use crate::modules::catalog::domain::entities::{CatalogGenre, CatalogMovieDetail, Genre, Movie};
use crate::schema::{genres, movies};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = movies)]
pub struct MovieModel {
    pub id: Uuid,
    pub tmdb_id: i32,
    pub title: String,
    pub overview: String,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
    pub vote_count: i32,
    pub popularity: f32,
    pub adult: bool,
    pub original_language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MovieModel {
    pub fn to_domain(self) -> Movie {
        Movie {
            id: self.id,
            tmdb_id: self.tmdb_id,
            title: self.title,
            overview: self.overview,
            release_date: self.release_date,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            popularity: self.popularity,
            adult: self.adult,
            original_language: self.original_language,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = movies)]
pub struct NewMovie {
    pub tmdb_id: i32,
    pub title: String,
    pub overview: String,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
    pub vote_count: i32,
    pub popularity: f32,
    pub adult: bool,
    pub original_language: String,
}

impl NewMovie {
    pub fn from_detail(detail: &CatalogMovieDetail) -> Self {
        Self {
            tmdb_id: detail.tmdb_id,
            title: detail.title.clone(),
            overview: detail.overview.clone(),
            release_date: detail.release_date,
            poster_path: detail.poster_path.clone(),
            backdrop_path: detail.backdrop_path.clone(),
            vote_average: detail.vote_average,
            vote_count: detail.vote_count,
            popularity: detail.popularity,
            adult: detail.adult,
            original_language: detail.original_language.clone(),
        }
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = genres)]
pub struct GenreModel {
    pub id: Uuid,
    pub tmdb_id: i32,
    pub name: String,
}

impl GenreModel {
    pub fn to_domain(self) -> Genre {
        Genre {
            id: self.id,
            tmdb_id: self.tmdb_id,
            name: self.name,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = genres)]
pub struct NewGenre {
    pub tmdb_id: i32,
    pub name: String,
}

impl NewGenre {
    pub fn from_catalog(genre: &CatalogGenre) -> Self {
        Self {
            tmdb_id: genre.tmdb_id,
            name: genre.name.clone(),
        }
    }
}
