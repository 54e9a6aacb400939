// Document Writer: composes a resume and writes it as PDF bytes.
// Synchronous and CPU-bound; async callers wrap it in tokio::task::spawn_blocking.

pub mod pdf;

use thiserror::Error;
use tracing::debug;

use crate::layout::{compose, PageConfig};
use crate::resumes::snapshot::UserSnapshot;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF writer failed: {0}")]
    Pdf(String),
}

/// Composes and renders `snapshot` with `summary` to a PDF byte stream.
pub fn render_resume_pdf(
    snapshot: &UserSnapshot,
    summary: Option<&str>,
    config: &PageConfig,
) -> Result<Vec<u8>, RenderError> {
    let blocks = compose(snapshot, summary);
    debug!(
        "Rendering {} block(s) onto {} page(s)",
        blocks.len(),
        pdf::page_count(&blocks, config)
    );
    pdf::write_pdf(&format!("{} - Resume", snapshot.full_name), &blocks, config)
}

/// `Ada Lovelace` → `Ada_Lovelace_Resume.pdf`.
pub fn export_filename(full_name: &str) -> String {
    format!("{}_Resume.pdf", full_name.replace(' ', "_"))
}
