//! Repository for the `images` table.

use sqlx::PgPool;
use vidya_core::types::DbId;

use crate::models::image::{CreateImage, Image};

const COLUMNS: &str = "id, filename, content_type, created_at";

/// Provides create/find/delete for image records.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (filename, content_type)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(&input.filename)
            .bind(&input.content_type)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every image whose id is in `ids`. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Image>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = ANY($1)");
        sqlx::query_as::<_, Image>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Permanently delete an image record. Returns `true` if a row was removed.
    ///
    /// Any game still pointing at it has its `image_id` cleared by the
    /// `ON DELETE SET NULL` constraint.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
