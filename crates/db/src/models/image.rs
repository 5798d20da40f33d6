//! Image entity model and DTO.
//!
//! An image row only records where the uploaded file lives; the bytes are
//! kept on disk under the public images directory.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidya_core::types::{DbId, Timestamp};

/// A row from the `images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub filename: String,
    pub content_type: String,
    pub created_at: Timestamp,
}

impl Image {
    /// Public path the stored file is served from.
    pub fn src(&self) -> String {
        format!("/images/{}", self.filename)
    }
}

/// DTO for creating a new image record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateImage {
    pub filename: String,
    pub content_type: String,
}
