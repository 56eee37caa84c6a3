use super::Database;
use crate::Result;

impl Database {
    /// Check if database schema is initialized
    /// Returns true if all required tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        let required_tables = vec!["creators", "interactions"];

        for table_name in required_tables {
            let result = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(self.pool())
            .await?;

            if !result {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        // conversation_terms is the key indicator of the analysis-ready schema
        let has_conversation_terms = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT FROM information_schema.columns
                WHERE table_schema = 'public'
                AND table_name = 'creators'
                AND column_name = 'conversation_terms'
            )
            ",
        )
        .fetch_one(self.pool())
        .await?;

        if !has_conversation_terms {
            tracing::debug!("creators missing conversation_terms column - old schema detected");
            return Ok(false);
        }

        Ok(true)
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS creators (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                full_name VARCHAR(255) NOT NULL,
                email VARCHAR(255),
                phone VARCHAR(64),
                instagram VARCHAR(255),
                tiktok VARCHAR(255),
                youtube VARCHAR(255),
                twitter VARCHAR(255),
                primary_content_type VARCHAR(255),
                audience_size BIGINT,
                engagement_rate DOUBLE PRECISION,
                notes TEXT,
                tags TEXT[] NOT NULL DEFAULT '{}',
                verified BOOLEAN NOT NULL DEFAULT FALSE,
                conversation_terms JSONB NOT NULL DEFAULT '{}',
                conversation_terms_by_platform JSONB NOT NULL DEFAULT '{}',
                analysis_metadata JSONB NOT NULL DEFAULT '{}',
                last_comment_fetch_at TIMESTAMPTZ,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS interactions (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                creator_id UUID NOT NULL REFERENCES creators(id) ON DELETE CASCADE,
                interaction_type VARCHAR(64) NOT NULL,
                notes TEXT,
                date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_creators_full_name ON creators (full_name)",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_interactions_creator_date ON interactions (creator_id, date DESC)",
        )
        .execute(self.pool())
        .await?;

        tracing::info!("Database schema initialized");
        Ok(())
    }
}
