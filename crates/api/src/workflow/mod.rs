//! Mutation workflows and page assembly for the catalog.
//!
//! Handlers extract the request and hand it to these functions; every
//! function answers with either a [`View`] to render or an [`Outcome`].

pub mod game;
pub mod genre;
pub mod image;

use axum::response::{IntoResponse, Redirect, Response};

use crate::views::View;

/// Result of a form submission.
#[derive(Debug)]
pub enum Outcome {
    /// Persisted; send the browser to this page with `303 See Other`.
    Redirect(String),
    /// Recoverable rejection; show the form again.
    Render(View),
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Redirect(to) => Redirect::to(&to).into_response(),
            Outcome::Render(view) => view.into_response(),
        }
    }
}
