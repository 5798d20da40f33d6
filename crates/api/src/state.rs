use std::sync::Arc;

use vidya_core::access::MutationGate;
use vidya_db::store::CatalogStore;

use crate::config::ServerConfig;
use crate::storage::ImageStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog persistence (PostgreSQL in production, in-memory in tests).
    pub store: Arc<dyn CatalogStore>,
    /// Capability check for update and delete submissions.
    pub gate: Arc<dyn MutationGate>,
    /// Where image files are written and removed.
    pub images: ImageStorage,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
