use chrono::Utc;
use uuid::Uuid;

use super::Database;
use crate::models::CreateInteractionRequest;
use crate::models::Interaction;
use crate::Result;

impl Database {
    /// Record a contact-history entry for a creator
    pub async fn add_interaction(
        &self,
        creator_id: Uuid,
        request: CreateInteractionRequest,
    ) -> Result<Interaction> {
        let date = request.date.unwrap_or_else(Utc::now);

        let interaction = sqlx::query_as::<_, Interaction>(
            r"
            INSERT INTO interactions (creator_id, interaction_type, notes, date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(creator_id)
        .bind(&request.interaction_type)
        .bind(&request.notes)
        .bind(date)
        .fetch_one(self.pool())
        .await?;

        Ok(interaction)
    }

    /// Most recent interactions for a creator
    pub async fn list_interactions(
        &self,
        creator_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<Interaction>> {
        let limit = limit.unwrap_or(50);

        let interactions = sqlx::query_as::<_, Interaction>(
            "SELECT * FROM interactions WHERE creator_id = $1 ORDER BY date DESC LIMIT $2",
        )
        .bind(creator_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(interactions)
    }
}
