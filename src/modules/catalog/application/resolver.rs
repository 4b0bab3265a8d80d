/// Catalog resolver
///
/// Orchestrates the external catalog and local persistence: search by
/// title, fetch detail by catalog id, and materialize canonical
/// movie/genre rows idempotently.
use crate::modules::catalog::domain::entities::{
    CanonicalMovie, CatalogMovieDetail, CatalogMovieSummary,
};
use crate::modules::catalog::domain::provider::CatalogProvider;
use crate::modules::catalog::domain::repository::MovieRepository;
use crate::shared::errors::AppResult;
use crate::{log_debug, log_info};
use std::sync::Arc;

pub struct CatalogResolver {
    provider: Arc<dyn CatalogProvider>,
    movies: Arc<dyn MovieRepository>,
}

impl CatalogResolver {
    pub fn new(provider: Arc<dyn CatalogProvider>, movies: Arc<dyn MovieRepository>) -> Self {
        Self { provider, movies }
    }

    /// Free-text search against the catalog. Zero hits is an empty list.
    pub async fn search_by_title(&self, title: &str) -> AppResult<Vec<CatalogMovieSummary>> {
        let results = self.provider.search_movies(title).await?;
        log_debug!("Catalog search for '{}' returned {} hits", title, results.len());
        Ok(results)
    }

    /// Fetch full detail for one catalog id. `AppError::NotFound` when the
    /// catalog reports no such id.
    pub async fn resolve_by_catalog_id(&self, tmdb_id: i32) -> AppResult<CatalogMovieDetail> {
        self.provider.movie_detail(tmdb_id).await
    }

    /// Upsert the movie and its genres into canonical storage. Safe to call
    /// concurrently for the same catalog id: every write is a find-or-create
    /// guarded by a unique constraint.
    pub async fn materialize(&self, detail: &CatalogMovieDetail) -> AppResult<CanonicalMovie> {
        let mut genres = Vec::with_capacity(detail.genres.len());
        for catalog_genre in &detail.genres {
            let genre = self.movies.find_or_create_genre(catalog_genre).await?;
            genres.push(genre);
        }

        let movie = self.movies.find_or_create_movie(detail).await?;

        for genre in &genres {
            self.movies.link_movie_genre(movie.id, genre.id).await?;
        }

        log_info!(
            "Materialized movie '{}' (tmdb_id: {}) with {} genres",
            movie.title,
            movie.tmdb_id,
            genres.len()
        );

        Ok(CanonicalMovie { movie, genres })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::entities::{CatalogGenre, Genre, Movie};
    use crate::modules::catalog::domain::provider::MockCatalogProvider;
    use crate::modules::catalog::domain::repository::MockMovieRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_detail() -> CatalogMovieDetail {
        CatalogMovieDetail {
            tmdb_id: 550,
            title: "Fight Club".to_string(),
            overview: "An insomniac office worker...".to_string(),
            release_date: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: 8.4,
            vote_count: 27000,
            popularity: 61.0,
            adult: false,
            original_language: "en".to_string(),
            genres: vec![
                CatalogGenre { tmdb_id: 18, name: "Drama".to_string() },
                CatalogGenre { tmdb_id: 53, name: "Thriller".to_string() },
            ],
        }
    }

    fn movie_for(detail: &CatalogMovieDetail) -> Movie {
        Movie {
            id: Uuid::new_v4(),
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
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn materialize_links_every_genre_once() {
        let detail = sample_detail();
        let movie = movie_for(&detail);
        let movie_id = movie.id;

        let provider = MockCatalogProvider::new();
        let mut repo = MockMovieRepository::new();

        repo.expect_find_or_create_genre()
            .times(2)
            .returning(|g| {
                Ok(Genre {
                    id: Uuid::new_v4(),
                    tmdb_id: g.tmdb_id,
                    name: g.name.clone(),
                })
            });
        repo.expect_find_or_create_movie()
            .times(1)
            .returning(move |_| Ok(movie.clone()));
        repo.expect_link_movie_genre()
            .times(2)
            .withf(move |mid, _| *mid == movie_id)
            .returning(|_, _| Ok(()));

        let resolver = CatalogResolver::new(Arc::new(provider), Arc::new(repo));
        let canonical = resolver.materialize(&detail).await.unwrap();

        assert_eq!(canonical.movie.tmdb_id, 550);
        assert_eq!(canonical.genres.len(), 2);
    }

    #[tokio::test]
    async fn search_passes_through_empty_results() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search_movies()
            .times(1)
            .returning(|_| Ok(vec![]));

        let repo = MockMovieRepository::new();
        let resolver = CatalogResolver::new(Arc::new(provider), Arc::new(repo));

        let hits = resolver.search_by_title("no such movie").await.unwrap();
        assert!(hits.is_empty());
    }
}
