pub mod models;
pub mod persistence;
pub mod tmdb;

pub use persistence::MovieRepositoryImpl;
pub use tmdb::TmdbClient;
