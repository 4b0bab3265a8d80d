/// Catalog module
///
/// Resolves titles and catalog ids against the external movie catalog and
/// materializes canonical movie/genre records.
///
/// Architecture:
/// - Domain: entities, the catalog provider boundary and repository trait
/// - Application: the resolver orchestrating search, fetch and upsert
/// - Infrastructure: TMDB adapter and Diesel-based persistence
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::resolver::CatalogResolver;
pub use domain::{
    entities::{CanonicalMovie, CatalogGenre, CatalogMovieDetail, CatalogMovieSummary, Genre, Movie},
    provider::CatalogProvider,
    repository::MovieRepository,
};
pub use infrastructure::persistence::MovieRepositoryImpl;
pub use infrastructure::tmdb::TmdbClient;
