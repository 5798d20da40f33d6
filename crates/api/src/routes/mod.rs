pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/catalog` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                 index
/// /games                            game list
/// /game/create                      form (GET), create (POST multipart)
/// /game/{id}                        game detail
/// /game/{id}/update                 form (GET), update (POST multipart)
/// /game/{id}/delete                 confirm (GET), delete (POST)
///
/// /genres                           genre list
/// /genre/create                     form (GET), create (POST)
/// /genre/{id}                       genre detail
/// /genre/{id}/update                form (GET), update (POST)
/// /genre/{id}/delete                confirm (GET), delete (POST)
/// ```
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::catalog::index))
        // Games.
        .route("/games", get(handlers::game::list))
        .route(
            "/game/create",
            get(handlers::game::create_form).post(handlers::game::create),
        )
        .route("/game/{id}", get(handlers::game::get_by_id))
        .route(
            "/game/{id}/update",
            get(handlers::game::update_form).post(handlers::game::update),
        )
        .route(
            "/game/{id}/delete",
            get(handlers::game::delete_form).post(handlers::game::delete),
        )
        // Genres.
        .route("/genres", get(handlers::genre::list))
        .route(
            "/genre/create",
            get(handlers::genre::create_form).post(handlers::genre::create),
        )
        .route("/genre/{id}", get(handlers::genre::get_by_id))
        .route(
            "/genre/{id}/update",
            get(handlers::genre::update_form).post(handlers::genre::update),
        )
        .route(
            "/genre/{id}/delete",
            get(handlers::genre::delete_form).post(handlers::genre::delete),
        )
}
