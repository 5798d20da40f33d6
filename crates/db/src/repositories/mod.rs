//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod game_repo;
pub mod genre_repo;
pub mod image_repo;

pub use game_repo::GameRepo;
pub use genre_repo::GenreRepo;
pub use image_repo::ImageRepo;
