/// Favorites module
///
/// Favorite add/remove are the pipeline's trigger points: each mutation
/// enqueues exactly one recalculation job for the affected user.
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::service::FavoriteService;
pub use domain::{entities::FavoriteMovie, repository::FavoriteRepository};
pub use infrastructure::repository::FavoriteRepositoryImpl;
