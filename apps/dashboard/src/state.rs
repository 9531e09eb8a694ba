use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend_client::MatchBackend;
use crate::catalog::FileCatalog;
use crate::config::Config;
use crate::selection::controller::SelectionController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn MatchBackend>,
    /// Handle to the task that owns the dashboard selection.
    pub selection: SelectionController,
    pub catalog: Arc<RwLock<FileCatalog>>,
    pub config: Config,
}
