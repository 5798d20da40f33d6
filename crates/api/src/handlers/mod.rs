//! Request handlers for the catalog.
//!
//! Handlers only extract the request (path, form, multipart) and delegate to
//! [`crate::workflow`]; errors are mapped via [`crate::error::AppError`].

pub mod catalog;
pub mod game;
pub mod genre;
