//! Shared application state

use salesdash_engine::SnapshotStore;
use std::sync::Arc;

/// State shared across route handlers
///
/// Handlers capture one `Arc<Snapshot>` from the store per request, so
/// every response is computed against a single consistent capture.
#[derive(Clone)]
pub struct AppState {
    /// TTL-cached snapshot store over the ledger source
    pub store: Arc<SnapshotStore>,
}
