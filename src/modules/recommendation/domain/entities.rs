use crate::modules::catalog::domain::entities::Movie;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored recommendation row: one movie per user with the model's reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: Uuid,
    pub user_id: i32,
    pub movie_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// One suggestion from the completion collaborator, as constrained by the
/// structured-output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovieSuggestion {
    pub title: String,
    pub reason: String,
}

/// The full structured completion payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuggestionList {
    pub recommendation: Vec<MovieSuggestion>,
}

/// A suggestion that resolved against the catalog and was materialized.
#[derive(Debug, Clone)]
pub struct MaterializedRecommendation {
    pub movie: Movie,
    pub reason: String,
}

/// Result of the replace step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// The set was replaced; carries the number of stored rows.
    Committed(usize),
    /// A fresher run already committed for this user; nothing was written.
    StaleSkipped,
    /// The new set was empty; existing rows were kept untouched.
    EmptyKept,
}
