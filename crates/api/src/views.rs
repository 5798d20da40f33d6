//! Named views and their payloads.
//!
//! Templating is not this server's concern: a view is returned as
//! `{ "view": "<name>", "data": { ... } }` for whatever renders it. All text
//! in a payload was escaped when it was stored, so renderers emit it as is.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use vidya_core::forms::{FieldError, GameSubmission, GenreSubmission};
use vidya_core::types::DbId;
use vidya_db::models::game::{Game, GameWithImage};
use vidya_db::models::genre::Genre;
use vidya_db::models::image::Image;

/// Every page the catalog can render.
#[derive(Debug, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "snake_case")]
pub enum View {
    Index(IndexPage),
    GameList(GameListPage),
    GameDetail(GameDetailPage),
    GameForm(GameFormPage),
    GameDelete(GameDeletePage),
    GenreList(GenreListPage),
    GenreDetail(GenreDetailPage),
    GenreForm(GenreFormPage),
    GenreDelete(GenreDeletePage),
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

// ---------------------------------------------------------------------------
// Entity projections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GenreView {
    pub id: DbId,
    pub name: String,
    pub lowercase_name: String,
    pub description: String,
    pub url: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
            lowercase_name: genre.lowercase_name(),
            description: genre.description.clone(),
            url: genre.url(),
        }
    }
}

pub fn genre_views(genres: &[Genre]) -> Vec<GenreView> {
    genres.iter().map(GenreView::from).collect()
}

/// A genre as an option of the game form's genre picker.
#[derive(Debug, Clone, Serialize)]
pub struct GenreOption {
    pub id: DbId,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageView {
    pub id: DbId,
    pub filename: String,
    pub content_type: String,
    pub src: String,
}

impl From<&Image> for ImageView {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id,
            filename: image.filename.clone(),
            content_type: image.content_type.clone(),
            src: image.src(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub stock: i32,
    pub price: f64,
    pub formatted_price: String,
    pub url: String,
    pub genre_id: DbId,
    pub image: Option<ImageView>,
}

impl GameView {
    pub fn new(game: &Game, image: Option<&Image>) -> Self {
        Self {
            id: game.id,
            title: game.title.clone(),
            description: game.description.clone(),
            stock: game.stock,
            price: game.price,
            formatted_price: game.formatted_price(),
            url: game.url(),
            genre_id: game.genre_id,
            image: image.map(ImageView::from),
        }
    }
}

impl From<&GameWithImage> for GameView {
    fn from(item: &GameWithImage) -> Self {
        GameView::new(&item.game, item.image.as_ref())
    }
}

pub fn game_views(games: &[GameWithImage]) -> Vec<GameView> {
    games.iter().map(GameView::from).collect()
}

// ---------------------------------------------------------------------------
// Form values
// ---------------------------------------------------------------------------

/// Values a game form is pre-filled with.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameFormValues {
    pub id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub stock: String,
    pub price: String,
    pub genre: Option<String>,
    pub image: Option<DbId>,
}

impl GameFormValues {
    /// Echo a (sanitized) submission back into the form.
    pub fn from_submission(id: Option<DbId>, submission: GameSubmission, image: Option<DbId>) -> Self {
        Self {
            id,
            title: submission.title,
            description: submission.description,
            stock: submission.stock,
            price: submission.price,
            genre: submission.genre,
            image,
        }
    }

    pub fn selected_genre(&self) -> Option<DbId> {
        self.genre.as_deref().and_then(|g| g.parse().ok())
    }
}

impl From<&Game> for GameFormValues {
    fn from(game: &Game) -> Self {
        Self {
            id: Some(game.id),
            title: game.title.clone(),
            description: game.description.clone(),
            stock: game.stock.to_string(),
            price: game.price.to_string(),
            genre: Some(game.genre_id.to_string()),
            image: game.image_id,
        }
    }
}

/// Values a genre form is pre-filled with.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenreFormValues {
    pub id: Option<DbId>,
    pub name: String,
    pub description: String,
}

impl GenreFormValues {
    pub fn from_submission(id: Option<DbId>, submission: GenreSubmission) -> Self {
        Self {
            id,
            name: submission.name,
            description: submission.description,
        }
    }
}

impl From<&Genre> for GenreFormValues {
    fn from(genre: &Genre) -> Self {
        Self {
            id: Some(genre.id),
            name: genre.name.clone(),
            description: genre.description.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub title: String,
    pub game_count: i64,
    pub genre_count: i64,
    pub units_count: i64,
    pub genres: Vec<GenreView>,
}

#[derive(Debug, Serialize)]
pub struct GameListPage {
    pub title: String,
    pub games: Vec<GameView>,
    pub genres: Vec<GenreView>,
}

#[derive(Debug, Serialize)]
pub struct GameDetailPage {
    pub title: String,
    pub game: GameView,
    pub genre: Option<GenreView>,
    pub genres: Vec<GenreView>,
}

#[derive(Debug, Serialize)]
pub struct GameFormPage {
    pub title: String,
    pub genres: Vec<GenreOption>,
    pub game: Option<GameFormValues>,
    pub errors: Vec<FieldError>,
    /// Show the password input.
    pub password: bool,
    /// The submitted password did not match.
    pub no_match: bool,
    /// Offer the "remove image" checkbox.
    pub remove_image: bool,
}

#[derive(Debug, Serialize)]
pub struct GameDeletePage {
    pub title: String,
    pub game: GameView,
    pub password: bool,
    pub no_match: bool,
}

#[derive(Debug, Serialize)]
pub struct GenreListPage {
    pub title: String,
    pub genres: Vec<GenreView>,
}

#[derive(Debug, Serialize)]
pub struct GenreDetailPage {
    pub title: String,
    pub genre: GenreView,
    pub genre_games: Vec<GameView>,
    pub genres: Vec<GenreView>,
}

#[derive(Debug, Serialize)]
pub struct GenreFormPage {
    pub title: String,
    pub genre: Option<GenreFormValues>,
    pub genres: Vec<GenreView>,
    pub errors: Vec<FieldError>,
    pub password: bool,
    pub no_match: bool,
}

#[derive(Debug, Serialize)]
pub struct GenreDeletePage {
    pub title: String,
    pub genre: GenreView,
    /// Games still filed under the genre; deletion is refused while non-empty.
    pub genre_games: Vec<GameView>,
    pub genres: Vec<GenreView>,
    pub password: bool,
    pub no_match: bool,
}
