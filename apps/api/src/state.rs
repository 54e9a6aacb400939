use std::sync::Arc;

use crate::generation::SummaryGenerator;
use crate::layout::PageConfig;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence port. `PgRecordStore` in production.
    pub store: Arc<dyn RecordStore>,
    /// Tiered summary generator; never fails.
    pub summaries: Arc<SummaryGenerator>,
    /// Page geometry for PDF export (US letter).
    pub page_config: PageConfig,
}
