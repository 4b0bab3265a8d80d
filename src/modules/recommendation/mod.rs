/// Recommendation module
///
/// Turns a user's favorites into a stored recommendation set: builds a
/// prompt, asks the completion collaborator for candidate titles, resolves
/// them through the catalog and atomically replaces the user's set.
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::calculator::RecommendationCalculator;
pub use domain::{
    entities::{MaterializedRecommendation, MovieSuggestion, Recommendation, ReplaceOutcome, SuggestionList},
    provider::CompletionProvider,
    repository::RecommendationRepository,
};
pub use infrastructure::completion::OpenAiClient;
pub use infrastructure::persistence::RecommendationRepositoryImpl;
