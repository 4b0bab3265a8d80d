pub mod entities;
pub mod provider;
pub mod repository;

pub use entities::{
    MaterializedRecommendation, MovieSuggestion, Recommendation, ReplaceOutcome, SuggestionList,
};
pub use provider::CompletionProvider;
pub use repository::RecommendationRepository;
