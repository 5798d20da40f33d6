//! [`CatalogStore`] backed by PostgreSQL through the repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use vidya_core::types::DbId;

use crate::models::game::{CreateGame, Game, GameDetail, GameWithImage, UpdateGame};
use crate::models::genre::{CreateGenre, Genre, UpdateGenre};
use crate::models::image::{CreateImage, Image};
use crate::repositories::{GameRepo, GenreRepo, ImageRepo};
use crate::store::{CatalogStore, StoreError};
use crate::DbPool;

/// PostgreSQL foreign-key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Resolve each game's image with a single query.
    async fn attach_images(&self, games: Vec<Game>) -> Result<Vec<GameWithImage>, StoreError> {
        let ids: Vec<DbId> = games.iter().filter_map(|g| g.image_id).collect();
        let mut images: HashMap<DbId, Image> = ImageRepo::find_by_ids(&self.pool, &ids)
            .await?
            .into_iter()
            .map(|image| (image.id, image))
            .collect();

        Ok(games
            .into_iter()
            .map(|game| {
                let image = game.image_id.and_then(|id| images.remove(&id));
                GameWithImage { game, image }
            })
            .collect())
    }
}

/// Constraint name of a foreign-key violation, if `err` is one.
fn foreign_key_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
            Some(db_err.constraint().unwrap_or_default().to_string())
        }
        _ => None,
    }
}

/// Map a foreign-key violation on a game write to the reference that failed.
fn classify_game_write(err: sqlx::Error, genre_id: DbId, image_id: Option<DbId>) -> StoreError {
    match foreign_key_constraint(&err) {
        Some(constraint) if constraint.contains("image") => StoreError::MissingReference {
            entity: "Image",
            id: image_id.unwrap_or_default(),
        },
        Some(_) => StoreError::MissingReference {
            entity: "Genre",
            id: genre_id,
        },
        None => StoreError::Unavailable(err),
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, StoreError> {
        Ok(GenreRepo::list(&self.pool).await?)
    }

    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, StoreError> {
        Ok(GenreRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, StoreError> {
        Ok(GenreRepo::find_by_name(&self.pool, name).await?)
    }

    async fn create_genre(&self, input: &CreateGenre) -> Result<Genre, StoreError> {
        Ok(GenreRepo::create(&self.pool, input).await?)
    }

    async fn update_genre(
        &self,
        id: DbId,
        input: &UpdateGenre,
    ) -> Result<Option<Genre>, StoreError> {
        Ok(GenreRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_genre(&self, id: DbId) -> Result<bool, StoreError> {
        GenreRepo::delete(&self.pool, id).await.map_err(|err| {
            if foreign_key_constraint(&err).is_some() {
                StoreError::InUse { entity: "Genre", id }
            } else {
                StoreError::Unavailable(err)
            }
        })
    }

    async fn count_genres(&self) -> Result<i64, StoreError> {
        Ok(GenreRepo::count(&self.pool).await?)
    }

    async fn list_games(&self) -> Result<Vec<GameWithImage>, StoreError> {
        let games = GameRepo::list(&self.pool).await?;
        self.attach_images(games).await
    }

    async fn list_games_by_genre(&self, genre_id: DbId) -> Result<Vec<GameWithImage>, StoreError> {
        let games = GameRepo::list_by_genre(&self.pool, genre_id).await?;
        self.attach_images(games).await
    }

    async fn count_games_by_genre(&self, genre_id: DbId) -> Result<i64, StoreError> {
        Ok(GameRepo::count_by_genre(&self.pool, genre_id).await?)
    }

    async fn find_game(&self, id: DbId) -> Result<Option<Game>, StoreError> {
        Ok(GameRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_game_detail(&self, id: DbId) -> Result<Option<GameDetail>, StoreError> {
        let Some(game) = GameRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };
        let genre = GenreRepo::find_by_id(&self.pool, game.genre_id).await?;
        let image = match game.image_id {
            Some(image_id) => ImageRepo::find_by_id(&self.pool, image_id).await?,
            None => None,
        };
        Ok(Some(GameDetail { game, genre, image }))
    }

    async fn create_game(&self, input: &CreateGame) -> Result<Game, StoreError> {
        GameRepo::create(&self.pool, input)
            .await
            .map_err(|err| classify_game_write(err, input.genre_id, input.image_id))
    }

    async fn update_game(
        &self,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, StoreError> {
        GameRepo::update(&self.pool, id, input)
            .await
            .map_err(|err| classify_game_write(err, input.genre_id, input.image_id))
    }

    async fn delete_game(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(GameRepo::delete(&self.pool, id).await?)
    }

    async fn count_games(&self) -> Result<i64, StoreError> {
        Ok(GameRepo::count(&self.pool).await?)
    }

    async fn total_stock(&self) -> Result<i64, StoreError> {
        Ok(GameRepo::total_stock(&self.pool).await?)
    }

    async fn find_image(&self, id: DbId) -> Result<Option<Image>, StoreError> {
        Ok(ImageRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_image(&self, input: &CreateImage) -> Result<Image, StoreError> {
        Ok(ImageRepo::create(&self.pool, input).await?)
    }

    async fn delete_image(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ImageRepo::delete(&self.pool, id).await?)
    }
}
