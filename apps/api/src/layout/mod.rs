// Resume document layout: composition of text blocks and the page geometry
// the PDF writer flows them onto.
// Wrapping is CPU-bound and runs with rendering inside tokio::task::spawn_blocking.

pub mod document;
pub mod font_metrics;

pub use document::compose;
pub use font_metrics::{get_metrics, FontWeight};

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Page geometry in PDF points (1/72").
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_left_pt: f32,
    pub margin_right_pt: f32,
    pub margin_top_pt: f32,
    pub margin_bottom_pt: f32,
}

impl PageConfig {
    pub fn text_width_pt(&self) -> f32 {
        self.width_pt - self.margin_left_pt - self.margin_right_pt
    }
}

/// US letter (8.5" × 11"), 1" side and top margins, 0.25" bottom margin.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_pt: 612.0,
        height_pt: 792.0,
        margin_left_pt: 72.0,
        margin_right_pt: 72.0,
        margin_top_pt: 72.0,
        margin_bottom_pt: 18.0,
    }
}
