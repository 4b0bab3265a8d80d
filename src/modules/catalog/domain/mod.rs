pub mod entities;
pub mod provider;
pub mod repository;

pub use entities::{CanonicalMovie, CatalogGenre, CatalogMovieDetail, CatalogMovieSummary, Genre, Movie};
pub use provider::CatalogProvider;
pub use repository::MovieRepository;
