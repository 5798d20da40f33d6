//! Handlers for the `/catalog/genre*` routes.

use axum::extract::{Path, State};
use axum::Form;
use vidya_core::types::DbId;

use crate::error::AppResult;
use crate::forms::{DeleteForm, GenreForm};
use crate::state::AppState;
use crate::views::View;
use crate::workflow::{genre, Outcome};

/// GET /catalog/genres
pub async fn list(State(state): State<AppState>) -> AppResult<View> {
    genre::list_page(&state).await
}

/// GET /catalog/genre/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<View> {
    genre::detail_page(&state, id).await
}

/// GET /catalog/genre/create
pub async fn create_form(State(state): State<AppState>) -> AppResult<View> {
    genre::create_form(&state).await
}

/// POST /catalog/genre/create
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Outcome> {
    genre::create(&state, form).await
}

/// GET /catalog/genre/{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<View> {
    genre::update_form(&state, id).await
}

/// POST /catalog/genre/{id}/update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Form(form): Form<GenreForm>,
) -> AppResult<Outcome> {
    genre::update(&state, id, form).await
}

/// GET /catalog/genre/{id}/delete
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Outcome> {
    genre::delete_form(&state, id).await
}

/// POST /catalog/genre/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Form(form): Form<DeleteForm>,
) -> AppResult<Outcome> {
    genre::delete(&state, id, form).await
}
