/// Diesel models for the recommendations and recommendation_generations tables
use crate::modules::recommendation::domain::entities::Recommendation;
use crate::schema::{recommendation_generations, recommendations};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = recommendations)]
pub struct RecommendationModel {
    pub id: Uuid,
    pub user_id: i32,
    pub movie_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl RecommendationModel {
    pub fn to_domain(self) -> Recommendation {
        Recommendation {
            id: self.id,
            user_id: self.user_id,
            movie_id: self.movie_id,
            reason: self.reason,
            created_at: self.created_at,
        }
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = recommendations)]
pub struct NewRecommendation {
    pub user_id: i32,
    pub movie_id: Uuid,
    pub reason: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = recommendation_generations)]
pub struct NewGeneration {
    pub user_id: i32,
    pub committed_at: DateTime<Utc>,
}
