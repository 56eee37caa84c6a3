use uuid::Uuid;

use super::Database;
use crate::conversation::ConversationSnapshot;
use crate::models::CreateCreatorRequest;
use crate::models::Creator;
use crate::models::CreatorQuery;
use crate::models::UpdateCreatorRequest;
use crate::Result;

impl Database {
    /// Create a creator
    pub async fn create_creator(&self, request: CreateCreatorRequest) -> Result<Creator> {
        let creator = sqlx::query_as::<_, Creator>(
            r"
            INSERT INTO creators (
                full_name, email, phone,
                instagram, tiktok, youtube, twitter,
                primary_content_type, audience_size, engagement_rate,
                notes, tags, verified
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            ",
        )
        .bind(&request.full_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.instagram)
        .bind(&request.tiktok)
        .bind(&request.youtube)
        .bind(&request.twitter)
        .bind(&request.primary_content_type)
        .bind(request.audience_size)
        .bind(request.engagement_rate)
        .bind(&request.notes)
        .bind(&request.tags)
        .bind(request.verified)
        .fetch_one(self.pool())
        .await?;

        Ok(creator)
    }

    /// Get a creator by id
    pub async fn get_creator(&self, id: Uuid) -> Result<Option<Creator>> {
        let creator = sqlx::query_as::<_, Creator>("SELECT * FROM creators WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(creator)
    }

    /// List creators with filters
    pub async fn list_creators(&self, query: CreatorQuery) -> Result<Vec<Creator>> {
        let limit = query.limit.unwrap_or(20);
        let offset = query.offset.unwrap_or(0);

        let creators = if query.search.is_some() || query.verified.is_some() {
            let mut conditions = vec!["1=1".to_string()];
            let mut param_idx = 1;

            if query.search.is_some() {
                conditions.push(format!(
                    "(full_name ILIKE ${param_idx} OR email ILIKE ${param_idx} OR primary_content_type ILIKE ${param_idx})"
                ));
                param_idx += 1;
            }

            if query.verified.is_some() {
                conditions.push(format!("verified = ${param_idx}"));
            }

            let where_clause = conditions.join(" AND ");
            let sql = format!(
                "SELECT * FROM creators WHERE {where_clause} ORDER BY created_at DESC LIMIT {limit} OFFSET {offset}"
            );

            let mut q = sqlx::query_as::<_, Creator>(&sql);
            if let Some(search) = &query.search {
                q = q.bind(format!("%{search}%"));
            }
            if let Some(verified) = query.verified {
                q = q.bind(verified);
            }

            q.fetch_all(self.pool()).await?
        } else {
            sqlx::query_as::<_, Creator>(
                "SELECT * FROM creators ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool())
            .await?
        };

        Ok(creators)
    }

    /// Count creators matching the same filters as `list_creators`
    pub async fn count_creators(&self, query: &CreatorQuery) -> Result<i64> {
        let count = if query.search.is_some() || query.verified.is_some() {
            let mut conditions = vec!["1=1".to_string()];
            let mut param_idx = 1;

            if query.search.is_some() {
                conditions.push(format!(
                    "(full_name ILIKE ${param_idx} OR email ILIKE ${param_idx} OR primary_content_type ILIKE ${param_idx})"
                ));
                param_idx += 1;
            }

            if query.verified.is_some() {
                conditions.push(format!("verified = ${param_idx}"));
            }

            let where_clause = conditions.join(" AND ");
            let sql = format!("SELECT COUNT(*) FROM creators WHERE {where_clause}");

            let mut q = sqlx::query_scalar::<_, i64>(&sql);
            if let Some(search) = &query.search {
                q = q.bind(format!("%{search}%"));
            }
            if let Some(verified) = query.verified {
                q = q.bind(verified);
            }

            q.fetch_one(self.pool()).await?
        } else {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM creators")
                .fetch_one(self.pool())
                .await?
        };

        Ok(count)
    }

    /// Update a creator; unset request fields keep their current value
    pub async fn update_creator(
        &self,
        id: Uuid,
        request: UpdateCreatorRequest,
    ) -> Result<Option<Creator>> {
        let creator = sqlx::query_as::<_, Creator>(
            r"
            UPDATE creators SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                instagram = COALESCE($5, instagram),
                tiktok = COALESCE($6, tiktok),
                youtube = COALESCE($7, youtube),
                twitter = COALESCE($8, twitter),
                primary_content_type = COALESCE($9, primary_content_type),
                audience_size = COALESCE($10, audience_size),
                engagement_rate = COALESCE($11, engagement_rate),
                notes = COALESCE($12, notes),
                tags = COALESCE($13, tags),
                verified = COALESCE($14, verified),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(&request.full_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.instagram)
        .bind(&request.tiktok)
        .bind(&request.youtube)
        .bind(&request.twitter)
        .bind(&request.primary_content_type)
        .bind(request.audience_size)
        .bind(request.engagement_rate)
        .bind(&request.notes)
        .bind(&request.tags)
        .bind(request.verified)
        .fetch_optional(self.pool())
        .await?;

        Ok(creator)
    }

    /// Delete a creator; returns whether a row was removed
    pub async fn delete_creator(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM creators WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Persist a refresh snapshot onto the creator record.
    ///
    /// Single statement, so the stored cloud is replaced atomically; a failed
    /// write leaves the previous terms untouched.
    pub async fn update_conversation_cloud(
        &self,
        id: Uuid,
        snapshot: &ConversationSnapshot,
    ) -> Result<()> {
        let conversation_terms = serde_json::to_value(&snapshot.summary.top_overall)?;
        let terms_by_platform = serde_json::to_value(&snapshot.terms_by_platform)?;
        let analysis_metadata = serde_json::json!({
            "conversation_sources": snapshot.platforms,
            "caption_posts_by_platform": snapshot.caption_posts_by_platform,
            "comments_samples": snapshot.comment_samples_by_platform,
            "total_terms": snapshot.summary.total_terms,
            "fetched_in_ms": snapshot.fetched_in_ms,
        });

        let result = sqlx::query(
            r"
            UPDATE creators SET
                conversation_terms = $2,
                conversation_terms_by_platform = $3,
                analysis_metadata = $4,
                last_comment_fetch_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(conversation_terms)
        .bind(terms_by_platform)
        .bind(analysis_metadata)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(crate::CreatorHubError::CreatorNotFound(id));
        }

        Ok(())
    }
}
