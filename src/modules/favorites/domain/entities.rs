use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One favorited movie per user; the (user_id, movie_id) pair is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteMovie {
    pub id: Uuid,
    pub user_id: i32,
    pub movie_id: Uuid,
    pub created_at: DateTime<Utc>,
}
