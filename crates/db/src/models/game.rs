//! Game entity model, DTOs and populated views.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidya_core::types::{DbId, Timestamp};

use crate::models::genre::Genre;
use crate::models::image::Image;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub stock: i32,
    pub price: f64,
    pub genre_id: DbId,
    pub image_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Game {
    /// Canonical page for this game.
    pub fn url(&self) -> String {
        format!("/catalog/game/{}", self.id)
    }

    /// Price with the currency prefix, e.g. `$15` or `$9.99`.
    pub fn formatted_price(&self) -> String {
        format!("${}", self.price)
    }
}

/// DTO for creating a new game.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGame {
    pub title: String,
    pub description: String,
    pub stock: i32,
    pub price: f64,
    pub genre_id: DbId,
    pub image_id: Option<DbId>,
}

/// DTO for updating a game. Every column is replaced, including `image_id`
/// (`None` clears the image).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGame {
    pub title: String,
    pub description: String,
    pub stock: i32,
    pub price: f64,
    pub genre_id: DbId,
    pub image_id: Option<DbId>,
}

/// A game with its image resolved inline.
#[derive(Debug, Clone, Serialize)]
pub struct GameWithImage {
    pub game: Game,
    pub image: Option<Image>,
}

/// A game with both its genre and image resolved inline.
#[derive(Debug, Clone, Serialize)]
pub struct GameDetail {
    pub game: Game,
    pub genre: Option<Genre>,
    pub image: Option<Image>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(price: f64) -> Game {
        Game {
            id: 42,
            title: "Terraria".into(),
            description: "Sandbox".into(),
            stock: 7,
            price,
            genre_id: 1,
            image_id: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn url_is_keyed_by_id() {
        assert_eq!(game(1.0).url(), "/catalog/game/42");
    }

    #[test]
    fn whole_prices_have_no_fraction() {
        assert_eq!(game(15.0).formatted_price(), "$15");
        assert_eq!(game(9.99).formatted_price(), "$9.99");
    }
}
