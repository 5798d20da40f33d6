//! Domain logic for the Vidya Gamez inventory catalog.
//!
//! Everything in this crate is pure: form validation and sanitization, the
//! image lifecycle decision table, the game update state computation and
//! the mutation capability gate. Persistence lives in `vidya_db`, HTTP in
//! `vidya_api`.

pub mod access;
pub mod error;
pub mod forms;
pub mod game_state;
pub mod image_lifecycle;
pub mod sanitize;
pub mod types;
