//! In-process [`CatalogStore`] with the same referential rules as the
//! PostgreSQL schema: games need an existing genre (and image, when set),
//! genres cannot be deleted while referenced, and deleting an image clears
//! it from its game.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use vidya_core::types::DbId;

use crate::models::game::{CreateGame, Game, GameDetail, GameWithImage, UpdateGame};
use crate::models::genre::{CreateGenre, Genre, UpdateGenre};
use crate::models::image::{CreateImage, Image};
use crate::store::{CatalogStore, StoreError};

#[derive(Default)]
struct Tables {
    genres: BTreeMap<DbId, Genre>,
    games: BTreeMap<DbId, Game>,
    images: BTreeMap<DbId, Image>,
    last_id: DbId,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn check_game_references(
        &self,
        genre_id: DbId,
        image_id: Option<DbId>,
    ) -> Result<(), StoreError> {
        if !self.genres.contains_key(&genre_id) {
            return Err(StoreError::MissingReference {
                entity: "Genre",
                id: genre_id,
            });
        }
        match image_id {
            Some(id) if !self.images.contains_key(&id) => Err(StoreError::MissingReference {
                entity: "Image",
                id,
            }),
            _ => Ok(()),
        }
    }

    fn with_image(&self, game: &Game) -> GameWithImage {
        GameWithImage {
            game: game.clone(),
            image: game.image_id.and_then(|id| self.images.get(&id).cloned()),
        }
    }

    fn sorted_games<'a>(&self, games: impl Iterator<Item = &'a Game>) -> Vec<GameWithImage> {
        let mut list: Vec<GameWithImage> = games.map(|g| self.with_image(g)).collect();
        list.sort_by(|a, b| {
            a.game
                .title
                .cmp(&b.game.title)
                .then(a.game.id.cmp(&b.game.id))
        });
        list
    }
}

/// Catalog tables held in memory behind a [`RwLock`].
#[derive(Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of every image record currently stored.
    pub async fn image_ids(&self) -> Vec<DbId> {
        self.tables.read().await.images.keys().copied().collect()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, StoreError> {
        let tables = self.tables.read().await;
        let mut genres: Vec<Genre> = tables.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(genres)
    }

    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, StoreError> {
        Ok(self.tables.read().await.genres.get(&id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> Result<Option<Genre>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.genres.values().find(|g| g.name == name).cloned())
    }

    async fn create_genre(&self, input: &CreateGenre) -> Result<Genre, StoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let genre = Genre {
            id: tables.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn update_genre(
        &self,
        id: DbId,
        input: &UpdateGenre,
    ) -> Result<Option<Genre>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.genres.get_mut(&id).map(|genre| {
            genre.name = input.name.clone();
            genre.description = input.description.clone();
            genre.updated_at = Utc::now();
            genre.clone()
        }))
    }

    async fn delete_genre(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.games.values().any(|g| g.genre_id == id) {
            return Err(StoreError::InUse { entity: "Genre", id });
        }
        Ok(tables.genres.remove(&id).is_some())
    }

    async fn count_genres(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.genres.len() as i64)
    }

    async fn list_games(&self) -> Result<Vec<GameWithImage>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.sorted_games(tables.games.values()))
    }

    async fn list_games_by_genre(&self, genre_id: DbId) -> Result<Vec<GameWithImage>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.sorted_games(tables.games.values().filter(|g| g.genre_id == genre_id)))
    }

    async fn count_games_by_genre(&self, genre_id: DbId) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.games.values().filter(|g| g.genre_id == genre_id).count() as i64)
    }

    async fn find_game(&self, id: DbId) -> Result<Option<Game>, StoreError> {
        Ok(self.tables.read().await.games.get(&id).cloned())
    }

    async fn find_game_detail(&self, id: DbId) -> Result<Option<GameDetail>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.games.get(&id).map(|game| GameDetail {
            game: game.clone(),
            genre: tables.genres.get(&game.genre_id).cloned(),
            image: game.image_id.and_then(|i| tables.images.get(&i).cloned()),
        }))
    }

    async fn create_game(&self, input: &CreateGame) -> Result<Game, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_game_references(input.genre_id, input.image_id)?;
        let now = Utc::now();
        let game = Game {
            id: tables.next_id(),
            title: input.title.clone(),
            description: input.description.clone(),
            stock: input.stock,
            price: input.price,
            genre_id: input.genre_id,
            image_id: input.image_id,
            created_at: now,
            updated_at: now,
        };
        tables.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn update_game(
        &self,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.games.contains_key(&id) {
            return Ok(None);
        }
        tables.check_game_references(input.genre_id, input.image_id)?;
        Ok(tables.games.get_mut(&id).map(|game| {
            game.title = input.title.clone();
            game.description = input.description.clone();
            game.stock = input.stock;
            game.price = input.price;
            game.genre_id = input.genre_id;
            game.image_id = input.image_id;
            game.updated_at = Utc::now();
            game.clone()
        }))
    }

    async fn delete_game(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.games.remove(&id).is_some())
    }

    async fn count_games(&self) -> Result<i64, StoreError> {
        Ok(self.tables.read().await.games.len() as i64)
    }

    async fn total_stock(&self) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.games.values().map(|g| i64::from(g.stock)).sum())
    }

    async fn find_image(&self, id: DbId) -> Result<Option<Image>, StoreError> {
        Ok(self.tables.read().await.images.get(&id).cloned())
    }

    async fn create_image(&self, input: &CreateImage) -> Result<Image, StoreError> {
        let mut tables = self.tables.write().await;
        let image = Image {
            id: tables.next_id(),
            filename: input.filename.clone(),
            content_type: input.content_type.clone(),
            created_at: Utc::now(),
        };
        tables.images.insert(image.id, image.clone());
        Ok(image)
    }

    async fn delete_image(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let removed = tables.images.remove(&id).is_some();
        if removed {
            for game in tables.games.values_mut() {
                if game.image_id == Some(id) {
                    game.image_id = None;
                }
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    async fn seeded() -> (MemoryCatalogStore, Genre) {
        let store = MemoryCatalogStore::new();
        let genre = store
            .create_genre(&CreateGenre {
                name: "Indie".into(),
                description: "Small teams".into(),
            })
            .await
            .unwrap();
        (store, genre)
    }

    fn new_game(genre_id: DbId, image_id: Option<DbId>) -> CreateGame {
        CreateGame {
            title: "Terraria".into(),
            description: "Sandbox".into(),
            stock: 7,
            price: 10.0,
            genre_id,
            image_id,
        }
    }

    #[tokio::test]
    async fn game_requires_existing_genre() {
        let (store, _) = seeded().await;
        let err = store.create_game(&new_game(999, None)).await.unwrap_err();
        assert_matches!(err, StoreError::MissingReference { entity: "Genre", id: 999 });
    }

    #[tokio::test]
    async fn game_requires_existing_image() {
        let (store, genre) = seeded().await;
        let err = store
            .create_game(&new_game(genre.id, Some(555)))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::MissingReference { entity: "Image", .. });
    }

    #[tokio::test]
    async fn referenced_genre_cannot_be_deleted() {
        let (store, genre) = seeded().await;
        store.create_game(&new_game(genre.id, None)).await.unwrap();
        let err = store.delete_genre(genre.id).await.unwrap_err();
        assert_matches!(err, StoreError::InUse { .. });
        assert!(store.find_genre(genre.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_image_clears_game_reference() {
        let (store, genre) = seeded().await;
        let image = store
            .create_image(&CreateImage {
                filename: "a.png".into(),
                content_type: "image/png".into(),
            })
            .await
            .unwrap();
        let game = store
            .create_game(&new_game(genre.id, Some(image.id)))
            .await
            .unwrap();

        assert!(store.delete_image(image.id).await.unwrap());
        let game = store.find_game(game.id).await.unwrap().unwrap();
        assert_eq!(game.image_id, None);
    }

    #[tokio::test]
    async fn update_of_missing_game_is_none() {
        let (store, genre) = seeded().await;
        let input = UpdateGame {
            title: "X".into(),
            description: "Y".into(),
            stock: 1,
            price: 1.0,
            genre_id: genre.id,
            image_id: None,
        };
        assert!(store.update_game(404, &input).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn counters_and_population() {
        let (store, genre) = seeded().await;
        let image = store
            .create_image(&CreateImage {
                filename: "b.jpg".into(),
                content_type: "image/jpeg".into(),
            })
            .await
            .unwrap();
        let with_image = store
            .create_game(&new_game(genre.id, Some(image.id)))
            .await
            .unwrap();
        store.create_game(&new_game(genre.id, None)).await.unwrap();

        assert_eq!(store.count_games().await.unwrap(), 2);
        assert_eq!(store.count_genres().await.unwrap(), 1);
        assert_eq!(store.total_stock().await.unwrap(), 14);
        assert_eq!(store.count_games_by_genre(genre.id).await.unwrap(), 2);

        let detail = store.find_game_detail(with_image.id).await.unwrap().unwrap();
        assert_eq!(detail.genre.map(|g| g.name), Some("Indie".to_string()));
        assert_eq!(detail.image.map(|i| i.filename), Some("b.jpg".to_string()));
    }

    #[tokio::test]
    async fn name_lookup_is_case_sensitive() {
        let (store, genre) = seeded().await;
        assert_eq!(
            store.find_genre_by_name("Indie").await.unwrap().map(|g| g.id),
            Some(genre.id)
        );
        assert!(store.find_genre_by_name("indie").await.unwrap().is_none());
    }
}
