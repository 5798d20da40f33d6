//! Genre pages and the create / update / delete workflows.

use vidya_core::forms::FieldError;
use vidya_core::types::DbId;
use vidya_db::models::genre::{CreateGenre, Genre, UpdateGenre};
use vidya_db::store::StoreError;

use crate::error::{AppError, AppResult};
use crate::forms::{DeleteForm, GenreForm};
use crate::state::AppState;
use crate::views::{
    game_views, genre_views, GenreDeletePage, GenreDetailPage, GenreFormPage, GenreFormValues,
    GenreListPage, GenreView, View,
};
use crate::workflow::Outcome;

const GENRES_URL: &str = "/catalog/genres";

pub async fn list_page(state: &AppState) -> AppResult<View> {
    let genres = state.store.list_genres().await?;
    Ok(View::GenreList(GenreListPage {
        title: "Genre List".into(),
        genres: genre_views(&genres),
    }))
}

pub async fn detail_page(state: &AppState, id: DbId) -> AppResult<View> {
    let genre = find(state, id).await?;
    let games = state.store.list_games_by_genre(id).await?;
    let genres = state.store.list_genres().await?;
    Ok(View::GenreDetail(GenreDetailPage {
        title: genre.name.clone(),
        genre: GenreView::from(&genre),
        genre_games: game_views(&games),
        genres: genre_views(&genres),
    }))
}

pub async fn create_form(state: &AppState) -> AppResult<View> {
    let genres = state.store.list_genres().await?;
    Ok(form_page("Create Genre", &genres, None, Vec::new(), false, false))
}

/// Create a genre, or send the browser to the one that already carries the
/// submitted name.
pub async fn create(state: &AppState, form: GenreForm) -> AppResult<Outcome> {
    let checked = form.submission().check();
    let fields = match checked.outcome {
        Ok(fields) => fields,
        Err(errors) => {
            let genres = state.store.list_genres().await?;
            let values = GenreFormValues::from_submission(None, checked.sanitized);
            return Ok(Outcome::Render(form_page(
                "Create Genre",
                &genres,
                Some(values),
                errors,
                false,
                false,
            )));
        }
    };

    if let Some(existing) = state.store.find_genre_by_name(&fields.name).await? {
        tracing::debug!(genre_id = existing.id, "Genre already exists");
        return Ok(Outcome::Redirect(existing.url()));
    }

    let genre = state
        .store
        .create_genre(&CreateGenre {
            name: fields.name,
            description: fields.description,
        })
        .await?;
    tracing::info!(genre_id = genre.id, name = %genre.name, "Genre created");
    Ok(Outcome::Redirect(genre.url()))
}

pub async fn update_form(state: &AppState, id: DbId) -> AppResult<View> {
    let genre = find(state, id).await?;
    let genres = state.store.list_genres().await?;
    Ok(form_page(
        "Update Genre",
        &genres,
        Some(GenreFormValues::from(&genre)),
        Vec::new(),
        true,
        false,
    ))
}

pub async fn update(state: &AppState, id: DbId, form: GenreForm) -> AppResult<Outcome> {
    find(state, id).await?;
    let checked = form.submission().check();

    if !state.gate.has_mutation_capability(form.password.as_deref()) {
        tracing::info!(genre_id = id, "Genre update refused: password mismatch");
        let genres = state.store.list_genres().await?;
        let errors = checked.outcome.err().unwrap_or_default();
        let values = GenreFormValues::from_submission(Some(id), checked.sanitized);
        return Ok(Outcome::Render(form_page(
            "Update Genre",
            &genres,
            Some(values),
            errors,
            true,
            true,
        )));
    }

    let fields = match checked.outcome {
        Ok(fields) => fields,
        Err(errors) => {
            let genres = state.store.list_genres().await?;
            let values = GenreFormValues::from_submission(Some(id), checked.sanitized);
            return Ok(Outcome::Render(form_page(
                "Update Genre",
                &genres,
                Some(values),
                errors,
                true,
                false,
            )));
        }
    };

    let genre = state
        .store
        .update_genre(
            id,
            &UpdateGenre {
                name: fields.name,
                description: fields.description,
            },
        )
        .await?
        .ok_or_else(|| AppError::not_found("Genre", id))?;
    tracing::info!(genre_id = genre.id, "Genre updated");
    Ok(Outcome::Redirect(genre.url()))
}

/// Confirmation page. A genre that no longer exists sends the browser back
/// to the list.
pub async fn delete_form(state: &AppState, id: DbId) -> AppResult<Outcome> {
    let Some(genre) = state.store.find_genre(id).await? else {
        return Ok(Outcome::Redirect(GENRES_URL.into()));
    };
    let prompt = if state.store.count_games_by_genre(id).await? > 0 {
        DeletePrompt::Blocked
    } else {
        DeletePrompt::Confirm
    };
    Ok(Outcome::Render(delete_page(state, &genre, prompt).await?))
}

/// Delete a genre nothing references. While games are still filed under it
/// the confirmation page is shown again listing them, whatever the password.
pub async fn delete(state: &AppState, id: DbId, form: DeleteForm) -> AppResult<Outcome> {
    let genre = find(state, id).await?;

    if state.store.count_games_by_genre(id).await? > 0 {
        tracing::info!(genre_id = id, "Genre delete refused: still referenced");
        return Ok(Outcome::Render(delete_page(state, &genre, DeletePrompt::Blocked).await?));
    }

    if !state.gate.has_mutation_capability(form.password.as_deref()) {
        tracing::info!(genre_id = id, "Genre delete refused: password mismatch");
        return Ok(Outcome::Render(delete_page(state, &genre, DeletePrompt::NoMatch).await?));
    }

    match state.store.delete_genre(id).await {
        Ok(true) => {
            tracing::info!(genre_id = id, name = %genre.name, "Genre deleted");
            Ok(Outcome::Redirect(GENRES_URL.into()))
        }
        Ok(false) => Err(AppError::not_found("Genre", id)),
        // A game was filed under the genre after the count above.
        Err(StoreError::InUse { .. }) => {
            Ok(Outcome::Render(delete_page(state, &genre, DeletePrompt::Blocked).await?))
        }
        Err(err) => Err(err.into()),
    }
}

async fn find(state: &AppState, id: DbId) -> AppResult<Genre> {
    state
        .store
        .find_genre(id)
        .await?
        .ok_or_else(|| AppError::not_found("Genre", id))
}

/// How the genre delete page asks for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeletePrompt {
    /// Ask for the password.
    Confirm,
    /// Ask again after a wrong password.
    NoMatch,
    /// Games still reference the genre; there is nothing to confirm.
    Blocked,
}

async fn delete_page(state: &AppState, genre: &Genre, prompt: DeletePrompt) -> AppResult<View> {
    let games = state.store.list_games_by_genre(genre.id).await?;
    let genres = state.store.list_genres().await?;
    Ok(View::GenreDelete(GenreDeletePage {
        title: "Delete Genre".into(),
        genre: GenreView::from(genre),
        genre_games: game_views(&games),
        genres: genre_views(&genres),
        password: prompt != DeletePrompt::Blocked,
        no_match: prompt == DeletePrompt::NoMatch,
    }))
}

fn form_page(
    title: &str,
    genres: &[Genre],
    genre: Option<GenreFormValues>,
    errors: Vec<FieldError>,
    password: bool,
    no_match: bool,
) -> View {
    View::GenreForm(GenreFormPage {
        title: title.into(),
        genre,
        genres: genre_views(genres),
        errors,
        password,
        no_match,
    })
}
