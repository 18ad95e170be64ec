use std::sync::Arc;

use crate::compile::LatexCompiler;
use crate::storage::ArtifactStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub compiler: LatexCompiler,
    /// Pluggable artifact store. Default: S3ArtifactStore against the configured bucket.
    pub store: Arc<dyn ArtifactStore>,
}
