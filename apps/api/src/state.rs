use std::sync::Arc;

use crate::analysis::extractor::RequirementExtractor;
use crate::catalog::Catalog;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup, never mutated.
    pub catalog: Arc<Catalog>,
    /// Pluggable requirement extractor. Default: SimulatedExtractor.
    pub extractor: Arc<dyn RequirementExtractor>,
}
