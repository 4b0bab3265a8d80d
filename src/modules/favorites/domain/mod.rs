pub mod entities;
pub mod repository;

pub use entities::FavoriteMovie;
pub use repository::FavoriteRepository;
