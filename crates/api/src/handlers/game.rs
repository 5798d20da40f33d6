//! Handlers for the `/catalog/game*` routes.

use axum::extract::{Multipart, Path, State};
use axum::Form;
use vidya_core::types::DbId;

use crate::error::AppResult;
use crate::forms::{DeleteForm, GameMultipart};
use crate::state::AppState;
use crate::views::View;
use crate::workflow::{game, Outcome};

/// GET /catalog/games
pub async fn list(State(state): State<AppState>) -> AppResult<View> {
    game::list_page(&state).await
}

/// GET /catalog/game/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<View> {
    game::detail_page(&state, id).await
}

/// GET /catalog/game/create
pub async fn create_form(State(state): State<AppState>) -> AppResult<View> {
    game::create_form(&state).await
}

/// POST /catalog/game/create
pub async fn create(State(state): State<AppState>, multipart: Multipart) -> AppResult<Outcome> {
    let form = GameMultipart::read(multipart).await?;
    game::create(&state, form).await
}

/// GET /catalog/game/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<View> {
    game::update_form(&state, id).await
}

/// POST /catalog/game/{id}/update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Outcome> {
    let form = GameMultipart::read(multipart).await?;
    game::update(&state, id, form).await
}

/// GET /catalog/game/{id}/delete
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Outcome> {
    game::delete_form(&state, id).await
}

/// POST /catalog/game/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Form(form): Form<DeleteForm>,
) -> AppResult<Outcome> {
    game::delete(&state, id, form).await
}
