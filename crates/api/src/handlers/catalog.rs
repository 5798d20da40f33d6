use axum::extract::State;

use crate::error::AppResult;
use crate::state::AppState;
use crate::views::{genre_views, IndexPage, View};

/// GET /catalog -- inventory counters and genre navigation.
pub async fn index(State(state): State<AppState>) -> AppResult<View> {
    let (game_count, genre_count, units_count) = tokio::try_join!(
        state.store.count_games(),
        state.store.count_genres(),
        state.store.total_stock(),
    )?;
    let genres = state.store.list_genres().await?;

    Ok(View::Index(IndexPage {
        title: "Vidya Gamez Inventory".into(),
        game_count,
        genre_count,
        units_count,
        genres: genre_views(&genres),
    }))
}
