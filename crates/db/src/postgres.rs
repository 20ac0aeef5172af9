//! Postgres-backed [`SlideStore`].
//!
//! The commit protocol runs inside one transaction: a conditional bump of
//! the scope's row in `slide_scopes` detects stale snapshots, then the
//! batch of puts/deletes is applied. The deferred unique constraint on
//! `(site, language, position)` is checked at commit time, so intermediate
//! states inside the batch (two slides swapping through the same position)
//! are fine while a genuinely duplicate final position still fails the
//! whole transaction.

use sqlx::PgPool;
use vitrine_core::types::{Scope, SlideId};

use crate::models::Slide;
use crate::store::{ScopeVersion, SlideStore, SlideWrite, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, site, language, title, subtitle, description, \
    link_url, button_text, image_url, position, is_active, created_at, updated_at";

pub struct PgSlideStore {
    pool: PgPool,
}

impl PgSlideStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SlideStore for PgSlideStore {
    async fn snapshot(&self, scope: &Scope) -> Result<(Vec<Slide>, ScopeVersion), StoreError> {
        let version: Option<(i64,)> =
            sqlx::query_as("SELECT version FROM slide_scopes WHERE site = $1 AND language = $2")
                .bind(&scope.site)
                .bind(&scope.language)
                .fetch_optional(&self.pool)
                .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM slides \
             WHERE site = $1 AND language = $2 \
             ORDER BY position ASC"
        );
        let slides = sqlx::query_as::<_, Slide>(&query)
            .bind(&scope.site)
            .bind(&scope.language)
            .fetch_all(&self.pool)
            .await?;

        Ok((slides, version.map(|v| v.0).unwrap_or(0)))
    }

    async fn get(&self, scope: &Scope, id: SlideId) -> Result<Option<Slide>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM slides \
             WHERE site = $1 AND language = $2 AND id = $3"
        );
        let slide = sqlx::query_as::<_, Slide>(&query)
            .bind(&scope.site)
            .bind(&scope.language)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(slide)
    }

    async fn commit(
        &self,
        scope: &Scope,
        expected_version: ScopeVersion,
        writes: Vec<SlideWrite>,
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        // Scope rows are created lazily on first mutation, at version 0 to
        // match what snapshot() reports for an unknown scope.
        sqlx::query(
            "INSERT INTO slide_scopes (site, language, version) \
             VALUES ($1, $2, 0) \
             ON CONFLICT (site, language) DO NOTHING",
        )
        .bind(&scope.site)
        .bind(&scope.language)
        .execute(&mut *tx)
        .await?;

        let bumped = sqlx::query(
            "UPDATE slide_scopes SET version = version + 1 \
             WHERE site = $1 AND language = $2 AND version = $3",
        )
        .bind(&scope.site)
        .bind(&scope.language)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        if bumped.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(StoreError::Conflict);
        }

        let upsert = "INSERT INTO slides \
                (id, site, language, title, subtitle, description, \
                 link_url, button_text, image_url, position, is_active, \
                 created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT (id) DO UPDATE SET \
                title = EXCLUDED.title, \
                subtitle = EXCLUDED.subtitle, \
                description = EXCLUDED.description, \
                link_url = EXCLUDED.link_url, \
                button_text = EXCLUDED.button_text, \
                image_url = EXCLUDED.image_url, \
                position = EXCLUDED.position, \
                is_active = EXCLUDED.is_active, \
                updated_at = EXCLUDED.updated_at";

        for write in &writes {
            match write {
                SlideWrite::Put(slide) => {
                    sqlx::query(upsert)
                        .bind(slide.id)
                        .bind(&slide.site)
                        .bind(&slide.language)
                        .bind(&slide.title)
                        .bind(&slide.subtitle)
                        .bind(&slide.description)
                        .bind(&slide.link_url)
                        .bind(&slide.button_text)
                        .bind(&slide.image_url)
                        .bind(slide.position)
                        .bind(slide.is_active)
                        .bind(slide.created_at)
                        .bind(slide.updated_at)
                        .execute(&mut *tx)
                        .await?;
                }
                SlideWrite::Delete(id) => {
                    sqlx::query("DELETE FROM slides WHERE site = $1 AND language = $2 AND id = $3")
                        .bind(&scope.site)
                        .bind(&scope.language)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        tx.commit().await?;
        tracing::debug!(scope = %scope, writes = writes.len(), "Committed slide batch");
        Ok(())
    }
}
