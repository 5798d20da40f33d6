//! Game pages and the create / update / delete workflows.

use vidya_core::forms::{check_image_content_type, FieldError, GameFields};
use vidya_core::game_state::{compute_next_game_state, NextGameState};
use vidya_core::image_lifecycle::ImagePlan;
use vidya_core::types::DbId;
use vidya_db::models::game::{CreateGame, Game, UpdateGame};
use vidya_db::models::genre::Genre;
use vidya_db::models::image::Image;
use vidya_db::store::StoreError;

use crate::error::{AppError, AppResult};
use crate::forms::{DeleteForm, GameMultipart};
use crate::state::AppState;
use crate::storage::UploadedFile;
use crate::views::{
    game_views, genre_views, GameDeletePage, GameDetailPage, GameFormPage, GameFormValues,
    GameListPage, GameView, GenreOption, GenreView, View,
};
use crate::workflow::image::ImageLifecycle;
use crate::workflow::Outcome;

const GAMES_URL: &str = "/catalog/games";

pub async fn list_page(state: &AppState) -> AppResult<View> {
    let games = state.store.list_games().await?;
    let genres = state.store.list_genres().await?;
    Ok(View::GameList(GameListPage {
        title: "Game List".into(),
        games: game_views(&games),
        genres: genre_views(&genres),
    }))
}

pub async fn detail_page(state: &AppState, id: DbId) -> AppResult<View> {
    let detail = state
        .store
        .find_game_detail(id)
        .await?
        .ok_or_else(|| AppError::not_found("Game", id))?;
    let genres = state.store.list_genres().await?;
    Ok(View::GameDetail(GameDetailPage {
        title: detail.game.title.clone(),
        game: GameView::new(&detail.game, detail.image.as_ref()),
        genre: detail.genre.as_ref().map(GenreView::from),
        genres: genre_views(&genres),
    }))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

pub async fn create_form(state: &AppState) -> AppResult<View> {
    let genres = state.store.list_genres().await?;
    Ok(View::GameForm(FormRender::create(&genres, None, Vec::new())))
}

/// Validate, store the upload (if any), create the game. Ungated.
pub async fn create(state: &AppState, form: GameMultipart) -> AppResult<Outcome> {
    let checked = form.submission.check();
    let submitted = with_upload_check(checked.outcome, form.upload.as_ref());
    let values = GameFormValues::from_submission(None, checked.sanitized, None);

    let fields = match submitted {
        Ok(fields) => fields,
        Err(errors) => {
            let genres = state.store.list_genres().await?;
            return Ok(Outcome::Render(View::GameForm(FormRender::create(
                &genres,
                Some(values),
                errors,
            ))));
        }
    };

    let images = ImageLifecycle::new(state);
    let image = match &form.upload {
        Some(upload) => Some(images.store_upload(upload).await?),
        None => None,
    };

    let input = CreateGame {
        title: fields.title,
        description: fields.description,
        stock: fields.stock,
        price: fields.price,
        genre_id: fields.genre_id,
        image_id: image.as_ref().map(|i| i.id),
    };

    match state.store.create_game(&input).await {
        Ok(game) => {
            tracing::info!(game_id = game.id, title = %game.title, "Game created");
            Ok(Outcome::Redirect(game.url()))
        }
        Err(err) => {
            release(&images, image.as_ref()).await;
            if is_missing_genre(&err) {
                let genres = state.store.list_genres().await?;
                let errors = vec![missing_genre_error(&values)];
                return Ok(Outcome::Render(View::GameForm(FormRender::create(
                    &genres,
                    Some(values),
                    errors,
                ))));
            }
            Err(err.into())
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

pub async fn update_form(state: &AppState, id: DbId) -> AppResult<View> {
    let game = find(state, id).await?;
    let genres = state.store.list_genres().await?;
    Ok(View::GameForm(FormRender::update(
        &genres,
        GameFormValues::from(&game),
        Vec::new(),
        false,
    )))
}

/// Apply a game update submission.
///
/// The gate is checked before anything is written or deleted. On success the
/// game row is saved first and the image it no longer uses is discarded
/// afterwards.
pub async fn update(state: &AppState, id: DbId, form: GameMultipart) -> AppResult<Outcome> {
    let previous = find(state, id).await?;

    let checked = form.submission.check();
    let submitted = with_upload_check(checked.outcome, form.upload.as_ref());
    let password_ok = state.gate.has_mutation_capability(form.password.as_deref());

    let next = compute_next_game_state(
        previous.image_id,
        submitted,
        form.upload.is_some(),
        form.remove_image,
        password_ok,
    );

    let (fields, plan) = match next {
        NextGameState::Persist { fields, image } => (fields, image),
        NextGameState::RejectPasswordMismatch { errors, image } => {
            tracing::info!(game_id = id, "Game update refused: password mismatch");
            let genres = state.store.list_genres().await?;
            let values = GameFormValues::from_submission(Some(id), checked.sanitized, image);
            return Ok(Outcome::Render(View::GameForm(FormRender::update(
                &genres, values, errors, true,
            ))));
        }
        NextGameState::RejectValidation(errors) => {
            let genres = state.store.list_genres().await?;
            let values =
                GameFormValues::from_submission(Some(id), checked.sanitized, previous.image_id);
            return Ok(Outcome::Render(View::GameForm(FormRender::update(
                &genres, values, errors, false,
            ))));
        }
    };

    let images = ImageLifecycle::new(state);
    let attached = match (plan, &form.upload) {
        (ImagePlan::Attach { .. }, Some(upload)) => Some(images.store_upload(upload).await?),
        _ => None,
    };

    let input = UpdateGame {
        title: fields.title,
        description: fields.description,
        stock: fields.stock,
        price: fields.price,
        genre_id: fields.genre_id,
        image_id: attached.as_ref().map(|i| i.id).or(plan.surviving()),
    };

    match state.store.update_game(id, &input).await {
        Ok(Some(game)) => {
            if let Some(old) = plan.discarded() {
                images.discard_after_save(old).await;
            }
            tracing::info!(game_id = game.id, image_id = ?game.image_id, "Game updated");
            Ok(Outcome::Redirect(game.url()))
        }
        Ok(None) => {
            release(&images, attached.as_ref()).await;
            Err(AppError::not_found("Game", id))
        }
        Err(err) => {
            release(&images, attached.as_ref()).await;
            if is_missing_genre(&err) {
                let genres = state.store.list_genres().await?;
                let values =
                    GameFormValues::from_submission(Some(id), checked.sanitized, previous.image_id);
                let errors = vec![missing_genre_error(&values)];
                return Ok(Outcome::Render(View::GameForm(FormRender::update(
                    &genres, values, errors, false,
                ))));
            }
            Err(err.into())
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Confirmation page. A game that no longer exists sends the browser back to
/// the list.
pub async fn delete_form(state: &AppState, id: DbId) -> AppResult<Outcome> {
    match state.store.find_game_detail(id).await? {
        Some(detail) => Ok(Outcome::Render(View::GameDelete(GameDeletePage {
            title: "Delete Game".into(),
            game: GameView::new(&detail.game, detail.image.as_ref()),
            password: true,
            no_match: false,
        }))),
        None => Ok(Outcome::Redirect(GAMES_URL.into())),
    }
}

pub async fn delete(state: &AppState, id: DbId, form: DeleteForm) -> AppResult<Outcome> {
    let detail = state
        .store
        .find_game_detail(id)
        .await?
        .ok_or_else(|| AppError::not_found("Game", id))?;

    if !state.gate.has_mutation_capability(form.password.as_deref()) {
        tracing::info!(game_id = id, "Game delete refused: password mismatch");
        return Ok(Outcome::Render(View::GameDelete(GameDeletePage {
            title: "Delete Game".into(),
            game: GameView::new(&detail.game, detail.image.as_ref()),
            password: true,
            no_match: true,
        })));
    }

    if !state.store.delete_game(id).await? {
        return Err(AppError::not_found("Game", id));
    }
    if let Some(image_id) = detail.game.image_id {
        ImageLifecycle::new(state).discard_after_save(image_id).await;
    }

    tracing::info!(game_id = id, title = %detail.game.title, "Game deleted");
    Ok(Outcome::Redirect(GAMES_URL.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find(state: &AppState, id: DbId) -> AppResult<Game> {
    state
        .store
        .find_game(id)
        .await?
        .ok_or_else(|| AppError::not_found("Game", id))
}

/// Fold the upload's content-type check into the field validation result.
fn with_upload_check(
    submitted: Result<GameFields, Vec<FieldError>>,
    upload: Option<&UploadedFile>,
) -> Result<GameFields, Vec<FieldError>> {
    let Some(error) = upload.and_then(|u| check_image_content_type(&u.content_type)) else {
        return submitted;
    };
    let mut errors = submitted.err().unwrap_or_default();
    errors.push(error);
    Err(errors)
}

fn is_missing_genre(err: &StoreError) -> bool {
    matches!(err, StoreError::MissingReference { entity: "Genre", .. })
}

fn missing_genre_error(values: &GameFormValues) -> FieldError {
    FieldError::new(
        "genre",
        "Genre does not exist.",
        values.genre.clone().unwrap_or_default(),
    )
}

/// Undo a stored upload whose game could not be saved.
async fn release(images: &ImageLifecycle<'_>, image: Option<&Image>) {
    if let Some(image) = image {
        images.discard_after_save(image.id).await;
    }
}

fn genre_options(genres: &[Genre], selected: Option<DbId>) -> Vec<GenreOption> {
    genres
        .iter()
        .map(|g| GenreOption {
            id: g.id,
            name: g.name.clone(),
            selected: Some(g.id) == selected,
        })
        .collect()
}

struct FormRender;

impl FormRender {
    fn create(
        genres: &[Genre],
        values: Option<GameFormValues>,
        errors: Vec<FieldError>,
    ) -> GameFormPage {
        let selected = values.as_ref().and_then(GameFormValues::selected_genre);
        GameFormPage {
            title: "Create Game".into(),
            genres: genre_options(genres, selected),
            game: values,
            errors,
            password: false,
            no_match: false,
            remove_image: false,
        }
    }

    fn update(
        genres: &[Genre],
        values: GameFormValues,
        errors: Vec<FieldError>,
        no_match: bool,
    ) -> GameFormPage {
        GameFormPage {
            title: "Update Game".into(),
            genres: genre_options(genres, values.selected_genre()),
            remove_image: values.image.is_some(),
            game: Some(values),
            errors,
            password: true,
            no_match,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;

    use super::*;

    fn fields() -> GameFields {
        GameFields {
            title: "Doom".into(),
            description: "Demons".into(),
            stock: 1,
            price: 5.0,
            genre_id: 1,
        }
    }

    fn upload(content_type: &str) -> UploadedFile {
        UploadedFile {
            file_name: "x.png".into(),
            content_type: content_type.into(),
            bytes: Bytes::from_static(b"x"),
        }
    }

    #[test]
    fn image_upload_passes_through_valid_fields() {
        let out = with_upload_check(Ok(fields()), Some(&upload("image/png")));
        assert_eq!(out, Ok(fields()));
    }

    #[test]
    fn non_image_upload_adds_field_error() {
        let out = with_upload_check(Ok(fields()), Some(&upload("text/plain")));
        let errors = out.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].param, "image");
    }

    #[test]
    fn non_image_error_is_appended_to_existing_ones() {
        let existing = vec![FieldError::new("title", "Title must not be empty.", "")];
        let out = with_upload_check(Err(existing), Some(&upload("application/pdf")));
        let params: Vec<_> = out.unwrap_err().iter().map(|e| e.param).collect();
        assert_eq!(params, vec!["title", "image"]);
    }

    #[test]
    fn selected_genre_is_marked() {
        let now = chrono::Utc::now();
        let genres: Vec<Genre> = [(1, "FPS"), (2, "Indie")]
            .into_iter()
            .map(|(id, name)| Genre {
                id,
                name: name.into(),
                description: String::new(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        let options = genre_options(&genres, Some(2));
        assert!(!options[0].selected);
        assert!(options[1].selected);
    }
}
