pub mod models;
pub mod repository;
pub mod status_repository;

pub use repository::JobRepositoryImpl;
pub use status_repository::QueueStatusRepositoryImpl;
