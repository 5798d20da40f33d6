//! Genre entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidya_core::types::{DbId, Timestamp};

/// A row from the `genres` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Genre {
    /// Canonical page for this genre.
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }

    pub fn lowercase_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// DTO for creating a new genre.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGenre {
    pub name: String,
    pub description: String,
}

/// DTO for updating a genre. Both fields are replaced.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGenre {
    pub name: String,
    pub description: String,
}
