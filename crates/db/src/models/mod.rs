//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO for full-replacement updates (games and genres)

pub mod game;
pub mod genre;
pub mod image;
