//! Vidya Gamez inventory server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! workflows) so integration tests and the binaries can both use them.

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
pub mod views;
pub mod workflow;
