/// Diesel models for the favorite_movies table
use crate::modules::favorites::domain::entities::FavoriteMovie;
use crate::schema::favorite_movies;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = favorite_movies)]
pub struct FavoriteMovieModel {
    pub id: Uuid,
    pub user_id: i32,
    pub movie_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl FavoriteMovieModel {
    pub fn to_domain(self) -> FavoriteMovie {
        FavoriteMovie {
            id: self.id,
            user_id: self.user_id,
            movie_id: self.movie_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = favorite_movies)]
pub struct NewFavoriteMovie {
    pub user_id: i32,
    pub movie_id: Uuid,
}
