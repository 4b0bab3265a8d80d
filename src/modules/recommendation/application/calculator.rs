/// Recommendation calculator
///
/// The pipeline's core algorithm: favorites -> prompt -> structured
/// completion -> per-title catalog resolution -> atomic replace of the
/// stored set. Individual title misses are skipped; a degraded completion
/// response leaves stored recommendations untouched; upstream failures
/// propagate so the queue can redeliver the job.
use crate::modules::catalog::application::resolver::CatalogResolver;
use crate::modules::favorites::domain::repository::FavoriteRepository;
use crate::modules::recommendation::domain::entities::{
    MaterializedRecommendation, ReplaceOutcome,
};
use crate::modules::recommendation::domain::provider::CompletionProvider;
use crate::modules::recommendation::domain::repository::RecommendationRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info, log_warn};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct RecommendationCalculator {
    favorites: Arc<dyn FavoriteRepository>,
    completion: Arc<dyn CompletionProvider>,
    resolver: Arc<CatalogResolver>,
    recommendations: Arc<dyn RecommendationRepository>,
}

impl RecommendationCalculator {
    pub fn new(
        favorites: Arc<dyn FavoriteRepository>,
        completion: Arc<dyn CompletionProvider>,
        resolver: Arc<CatalogResolver>,
        recommendations: Arc<dyn RecommendationRepository>,
    ) -> Self {
        Self {
            favorites,
            completion,
            resolver,
            recommendations,
        }
    }

    /// Recompute the recommendation set for `user_id`. `snapshot_at` is the
    /// enqueue time of the triggering job and decides which of two
    /// overlapping runs for the same user wins the replace.
    pub async fn calculate(
        &self,
        user_id: i32,
        snapshot_at: DateTime<Utc>,
    ) -> AppResult<Vec<MaterializedRecommendation>> {
        let titles = self.favorites.titles_for_user(user_id).await?;
        log_info!(
            "Calculating recommendations for user {} from {} favorites",
            user_id,
            titles.len()
        );

        let prompt = build_prompt(&titles);
        log_debug!("Prompt for user {}: {}", user_id, prompt);

        let suggestions = match self.completion.suggest_recommendations(&prompt).await? {
            Some(list) => list.recommendation,
            None => {
                log_warn!(
                    "No parseable suggestions for user {}; keeping existing recommendations",
                    user_id
                );
                return Ok(Vec::new());
            }
        };

        log_info!(
            "Completion proposed {} titles for user {}",
            suggestions.len(),
            user_id
        );

        let mut materialized = Vec::new();
        for suggestion in suggestions {
            let hits = self.resolver.search_by_title(&suggestion.title).await?;
            let top_hit = match hits.first() {
                Some(hit) => hit.clone(),
                None => {
                    // AI suggestions are not guaranteed to exist in the
                    // catalog; a miss is not an error.
                    log_debug!(
                        "No catalog match for suggestion '{}'; skipping",
                        suggestion.title
                    );
                    continue;
                }
            };

            let detail = match self.resolver.resolve_by_catalog_id(top_hit.tmdb_id).await {
                Ok(detail) => detail,
                Err(AppError::NotFound(_)) => {
                    log_warn!(
                        "Catalog listed id {} for '{}' but detail fetch found nothing; skipping",
                        top_hit.tmdb_id,
                        suggestion.title
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            let canonical = self.resolver.materialize(&detail).await?;
            materialized.push(MaterializedRecommendation {
                movie: canonical.movie,
                reason: suggestion.reason,
            });
        }

        let outcome = self
            .recommendations
            .replace_for_user(user_id, &materialized, snapshot_at)
            .await?;

        match outcome {
            ReplaceOutcome::Committed(stored) => {
                log_info!(
                    "Stored {} recommendations for user {} ({} resolved)",
                    stored,
                    user_id,
                    materialized.len()
                );
            }
            ReplaceOutcome::StaleSkipped => {
                log_info!(
                    "Recommendations for user {} superseded by a fresher run; nothing stored",
                    user_id
                );
            }
            ReplaceOutcome::EmptyKept => {
                log_warn!(
                    "No suggestions resolved for user {}; existing recommendations kept",
                    user_id
                );
            }
        }

        Ok(materialized)
    }
}

/// Prompt for the completion collaborator. Users with no favorites still
/// get a usable generic prompt.
fn build_prompt(movie_titles: &[String]) -> String {
    if movie_titles.is_empty() {
        "Generate a movie recommendation list of 5-15 movie titles of popular, \
         widely acclaimed movies. For each, give a one-line reason why it is worth watching."
            .to_string()
    } else {
        format!(
            "Generate a movie recommendation list of 5-15 movie titles that are similar \
             to the following: {}. For each, give a one-line reason why it matches.",
            movie_titles.join(", ")
        )
    }
}
