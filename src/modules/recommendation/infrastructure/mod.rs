pub mod completion;
pub mod models;
pub mod persistence;

pub use completion::OpenAiClient;
pub use persistence::RecommendationRepositoryImpl;
