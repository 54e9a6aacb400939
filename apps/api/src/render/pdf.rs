//! printpdf writer: flows composed blocks top-to-bottom onto letter pages,
//! word-wrapping with the static Helvetica metrics and starting a new page
//! when a line would cross the bottom margin.

use printpdf::{
    Actions, BuiltinFont, Color, IndirectFontRef, LinkAnnotation, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Pt, Rect, Rgb,
};

use tracing::warn;

use crate::layout::document::{Align, Block, Link, TextStyle, SEPARATOR};
use crate::layout::{get_metrics, FontWeight, PageConfig};
use crate::render::RenderError;

const LAYER_NAME: &str = "Content";

fn mm(pt: f32) -> Mm {
    Mm::from(Pt(pt))
}

fn pdf_err<E: std::fmt::Debug>(e: E) -> RenderError {
    RenderError::Pdf(format!("{e:?}"))
}

// ────────────────────────────────────────────────────────────────────────────
// Line planning (geometry only, no PDF calls)
// ────────────────────────────────────────────────────────────────────────────

/// A run of text at a fixed position and weight.
#[derive(Debug, Clone, PartialEq)]
struct Run {
    text: String,
    x: f32,
    weight: FontWeight,
    /// Target of a link annotation over this run.
    url: Option<String>,
}

/// One baseline's worth of runs.
#[derive(Debug, Clone, PartialEq)]
struct Line {
    page: usize,
    baseline: f32,
    style: TextStyle,
    runs: Vec<Run>,
}

/// Tracks the vertical cursor across pages.
struct Flow<'a> {
    config: &'a PageConfig,
    page: usize,
    cursor: f32,
    lines: Vec<Line>,
}

impl<'a> Flow<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            page: 0,
            cursor: config.height_pt - config.margin_top_pt,
            lines: Vec::new(),
        }
    }

    fn skip(&mut self, gap: f32) {
        self.cursor -= gap;
    }

    fn place(&mut self, style: TextStyle, runs: Vec<Run>) {
        let leading = style.leading_pt();
        if self.cursor - leading < self.config.margin_bottom_pt {
            self.page += 1;
            self.cursor = self.config.height_pt - self.config.margin_top_pt;
        }
        self.cursor -= leading;
        self.lines.push(Line {
            page: self.page,
            baseline: self.cursor,
            style,
            runs,
        });
    }

    fn x_for(&self, style: &TextStyle, width: f32) -> f32 {
        match style.align {
            Align::Left => self.config.margin_left_pt,
            Align::Center => {
                self.config.margin_left_pt + ((self.config.text_width_pt() - width) / 2.0).max(0.0)
            }
        }
    }

    fn paragraph(&mut self, style: TextStyle, text: &str) {
        let metrics = get_metrics(style.weight);
        for line in metrics.wrap_lines(text, style.size_pt, self.config.text_width_pt(), 0.0) {
            let x = self.x_for(&style, metrics.width_pt(&line, style.size_pt));
            self.place(
                style,
                vec![Run {
                    text: line,
                    x,
                    weight: style.weight,
                    url: None,
                }],
            );
        }
    }

    fn labeled(&mut self, style: TextStyle, label: &str, text: &str) {
        let bold = get_metrics(FontWeight::Bold);
        let regular = get_metrics(FontWeight::Regular);
        let left = self.config.margin_left_pt;
        let offset = bold.width_pt(label, style.size_pt) + regular.width_pt(" ", style.size_pt);

        let lines = regular.wrap_lines(text, style.size_pt, self.config.text_width_pt(), offset);
        let mut label_run = Some(Run {
            text: label.to_string(),
            x: left,
            weight: FontWeight::Bold,
            url: None,
        });
        if lines.is_empty() {
            if let Some(run) = label_run.take() {
                self.place(style, vec![run]);
            }
        }
        for line in lines {
            let mut runs = Vec::with_capacity(2);
            let x = match label_run.take() {
                Some(run) => {
                    runs.push(run);
                    left + offset
                }
                None => left,
            };
            runs.push(Run {
                text: line,
                x,
                weight: FontWeight::Regular,
                url: None,
            });
            self.place(style, runs);
        }
    }

    fn links(&mut self, style: TextStyle, links: &[Link]) {
        let metrics = get_metrics(style.weight);
        let total: f32 = links
            .iter()
            .map(|l| metrics.width_pt(&l.label, style.size_pt))
            .sum::<f32>()
            + metrics.width_pt(SEPARATOR, style.size_pt) * links.len().saturating_sub(1) as f32;

        let mut x = self.x_for(&style, total);
        let mut runs = Vec::new();
        for (i, link) in links.iter().enumerate() {
            if i > 0 {
                runs.push(Run {
                    text: SEPARATOR.trim().to_string(),
                    x: x + metrics.width_pt(" ", style.size_pt),
                    weight: style.weight,
                    url: None,
                });
                x += metrics.width_pt(SEPARATOR, style.size_pt);
            }
            runs.push(Run {
                text: link.label.clone(),
                x,
                weight: style.weight,
                url: Some(link.url.clone()),
            });
            x += metrics.width_pt(&link.label, style.size_pt);
        }
        self.place(style, runs);
    }
}

fn plan(blocks: &[Block], config: &PageConfig) -> Vec<Line> {
    let mut flow = Flow::new(config);
    for block in blocks {
        let Some(style) = block.style().copied() else {
            if let Block::Spacer(gap) = block {
                flow.skip(*gap);
            }
            continue;
        };
        flow.skip(style.space_before_pt);
        match block {
            Block::Links(links) => flow.links(style, links),
            Block::Labeled { label, text } => flow.labeled(style, label, text),
            other => flow.paragraph(style, &other.text()),
        }
        flow.skip(style.space_after_pt);
    }
    flow.lines
}

/// Number of pages the blocks occupy. Always at least one.
pub fn page_count(blocks: &[Block], config: &PageConfig) -> usize {
    plan(blocks, config)
        .last()
        .map(|line| line.page + 1)
        .unwrap_or(1)
}

// ────────────────────────────────────────────────────────────────────────────
// PDF emission
// ────────────────────────────────────────────────────────────────────────────

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, RenderError> {
        Ok(Self {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_err)?,
        })
    }

    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn fill(layer: &PdfLayerReference, [r, g, b]: [u8; 3]) {
    layer.set_fill_color(Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    )));
}

// Windows-1252 code points above 0x7F that are not Latin-1.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Characters the built-in Helvetica encoding cannot show. printpdf drops them.
fn unencodable(text: &str) -> usize {
    text.chars()
        .filter(|&c| {
            !matches!(c, ' '..='~' | '\u{a0}'..='\u{ff}') && !WIN_ANSI_EXTRAS.contains(c)
        })
        .count()
}

/// Writes the blocks to a PDF document and returns its bytes.
pub fn write_pdf(title: &str, blocks: &[Block], config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        mm(config.width_pt),
        mm(config.height_pt),
        LAYER_NAME,
    );
    let fonts = Fonts::load(&doc)?;
    let mut layers: Vec<PdfLayerReference> = vec![doc.get_page(first_page).get_layer(first_layer)];
    let mut dropped = 0;

    for line in plan(blocks, config) {
        while layers.len() <= line.page {
            let (page, layer) = doc.add_page(mm(config.width_pt), mm(config.height_pt), LAYER_NAME);
            layers.push(doc.get_page(page).get_layer(layer));
        }
        let layer = &layers[line.page];
        fill(layer, line.style.color);

        for run in &line.runs {
            dropped += unencodable(&run.text);
            layer.use_text(
                run.text.as_str(),
                line.style.size_pt,
                mm(run.x),
                mm(line.baseline),
                fonts.get(run.weight),
            );
            if let Some(url) = &run.url {
                let width = get_metrics(run.weight).width_pt(&run.text, line.style.size_pt);
                layer.add_link_annotation(LinkAnnotation::new(
                    Rect::new(
                        mm(run.x),
                        mm(line.baseline - line.style.size_pt * 0.2),
                        mm(run.x + width),
                        mm(line.baseline + line.style.size_pt),
                    ),
                    None,
                    None,
                    Actions::uri(url.clone()),
                    None,
                ));
            }
        }
    }

    if dropped > 0 {
        warn!("Omitted {dropped} character(s) outside WinAnsi from PDF '{title}'");
    }

    doc.save_to_bytes().map_err(pdf_err)
}
