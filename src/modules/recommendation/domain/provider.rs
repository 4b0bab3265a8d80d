/// Boundary to the generative-completion collaborator
use crate::modules::recommendation::domain::entities::SuggestionList;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Ask the model for suggestions under the strict structured-output
    /// contract. Returns Ok(None) when the model produced no parseable
    /// structure (degraded output is not fatal); transport and auth
    /// failures are errors and bubble up to the queue's retry mechanism.
    async fn suggest_recommendations(&self, prompt: &str) -> AppResult<Option<SuggestionList>>;
}
