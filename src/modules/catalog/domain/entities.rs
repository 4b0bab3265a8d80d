use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical movie record, keyed locally by uuid and externally by the
/// catalog-assigned `tmdb_id` (unique, never duplicated).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: Uuid,
    pub tmdb_id: i32,
    pub name: String,
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A materialized movie together with its genres.
#[derive(Debug, Clone)]
pub struct CanonicalMovie {
    pub movie: Movie,
    pub genres: Vec<Genre>,
}

/// One hit from a catalog title search. Only the fields the pipeline needs;
/// resolution always goes through the detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMovieSummary {
    pub tmdb_id: i32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGenre {
    pub tmdb_id: i32,
    pub name: String,
}

/// Full catalog detail for a single movie, validated at the adapter
/// boundary. Required fields are enforced during mapping; everything the
/// catalog treats as optional stays optional here.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMovieDetail {
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
    pub genres: Vec<CatalogGenre>,
}
