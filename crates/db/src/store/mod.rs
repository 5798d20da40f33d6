//! The catalog store: every read and write the request workflows perform.
//!
//! Workflows hold an `Arc<dyn CatalogStore>` so they run unchanged against
//! PostgreSQL ([`PgCatalogStore`]) or the in-process tables used by tests
//! and local demos ([`MemoryCatalogStore`]).

use async_trait::async_trait;
use vidya_core::types::DbId;

use crate::models::game::{CreateGame, Game, GameDetail, GameWithImage, UpdateGame};
use crate::models::genre::{CreateGenre, Genre, UpdateGenre};
use crate::models::image::{CreateImage, Image};

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// Failures a store operation can report.
///
/// Absent rows are not errors: lookups return `Option`, deletes return
/// `bool`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write pointed at a row that does not exist (foreign-key violation).
    #[error("{entity} with id {id} does not exist")]
    MissingReference { entity: &'static str, id: DbId },

    /// A delete was blocked because other rows still reference the target.
    #[error("{entity} with id {id} is still referenced")]
    InUse { entity: &'static str, id: DbId },

    /// The backing database failed or could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    // -- Genres --------------------------------------------------------------

    async fn list_genres(&self) -> Result<Vec<Genre>, StoreError>;
    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, StoreError>;
    /// Exact, case-sensitive name lookup.
    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, StoreError>;
    async fn create_genre(&self, input: &CreateGenre) -> Result<Genre, StoreError>;
    async fn update_genre(
        &self,
        id: DbId,
        input: &UpdateGenre,
    ) -> Result<Option<Genre>, StoreError>;
    /// Fails with [`StoreError::InUse`] while games reference the genre.
    async fn delete_genre(&self, id: DbId) -> Result<bool, StoreError>;
    async fn count_genres(&self) -> Result<i64, StoreError>;

    // -- Games ---------------------------------------------------------------

    async fn list_games(&self) -> Result<Vec<GameWithImage>, StoreError>;
    async fn list_games_by_genre(&self, genre_id: DbId) -> Result<Vec<GameWithImage>, StoreError>;
    async fn count_games_by_genre(&self, genre_id: DbId) -> Result<i64, StoreError>;
    async fn find_game(&self, id: DbId) -> Result<Option<Game>, StoreError>;
    async fn find_game_detail(&self, id: DbId) -> Result<Option<GameDetail>, StoreError>;
    async fn create_game(&self, input: &CreateGame) -> Result<Game, StoreError>;
    async fn update_game(&self, id: DbId, input: &UpdateGame)
        -> Result<Option<Game>, StoreError>;
    async fn delete_game(&self, id: DbId) -> Result<bool, StoreError>;
    async fn count_games(&self) -> Result<i64, StoreError>;
    async fn total_stock(&self) -> Result<i64, StoreError>;

    // -- Images --------------------------------------------------------------

    async fn find_image(&self, id: DbId) -> Result<Option<Image>, StoreError>;
    async fn create_image(&self, input: &CreateImage) -> Result<Image, StoreError>;
    /// Removes the record only; the backing file is the caller's concern.
    async fn delete_image(&self, id: DbId) -> Result<bool, StoreError>;
}
