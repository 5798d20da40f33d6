//! Repository for the `games` table.

use sqlx::PgPool;
use vidya_core::types::DbId;

use crate::models::game::{CreateGame, Game, UpdateGame};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, stock, price, genre_id, image_id, created_at, updated_at";

/// Provides CRUD operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGame) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (title, description, stock, price, genre_id, image_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.stock)
            .bind(input.price)
            .bind(input.genre_id)
            .bind(input.image_id)
            .fetch_one(pool)
            .await
    }

    /// Find a game by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all games ordered by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games ORDER BY title, id");
        sqlx::query_as::<_, Game>(&query).fetch_all(pool).await
    }

    /// List the games filed under a genre, ordered by title.
    pub async fn list_by_genre(pool: &PgPool, genre_id: DbId) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE genre_id = $1 ORDER BY title, id");
        sqlx::query_as::<_, Game>(&query)
            .bind(genre_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_genre(pool: &PgPool, genre_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM games WHERE genre_id = $1")
            .bind(genre_id)
            .fetch_one(pool)
            .await
    }

    /// Replace every column of a game.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET
                title = $2,
                description = $3,
                stock = $4,
                price = $5,
                genre_id = $6,
                image_id = $7,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.stock)
            .bind(input.price)
            .bind(input.genre_id)
            .bind(input.image_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a game by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM games")
            .fetch_one(pool)
            .await
    }

    /// Sum of `stock` over every game (units on hand).
    pub async fn total_stock(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(SUM(stock), 0)::BIGINT FROM games")
            .fetch_one(pool)
            .await
    }
}
