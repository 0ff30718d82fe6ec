//! Paginated document export.
//!
//! The rendered report region is captured once as a full-resolution
//! snapshot, scaled to the page width and laid across as many fixed-size
//! pages as its height needs. Page `k` shows the same image shifted up by
//! `k` page heights.

use crate::chart::{ChartRenderer, ChartSpec, TextBarChart};
use crate::config::PageSize;
use crate::error::{ReportError, Result};
use crate::output::render_report_text;
use crate::types::Report;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Base font size of the captured region, before capture scaling.
pub const FONT_SIZE: f64 = 10.0;
pub const LINE_HEIGHT: f64 = 12.0;
/// Courier advance width is 0.6 em.
pub const CHAR_WIDTH: f64 = FONT_SIZE * 0.6;

/// A rasterized capture of the rendered report region.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub scale: f64,
    pub width_px: f64,
    pub height_px: f64,
}

impl Snapshot {
    pub fn capture(lines: Vec<String>, scale: f64) -> Self {
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width_px = (widest.max(1) as f64) * CHAR_WIDTH * scale;
        let height_px = lines.len() as f64 * LINE_HEIGHT * scale;
        Snapshot {
            lines,
            scale,
            width_px,
            height_px,
        }
    }
}

/// Everything the report view shows, top to bottom: headline block, table,
/// then the chart.
pub fn report_region_lines(report: &Report, chart: &ChartSpec, generated_on: &str) -> Vec<String> {
    let mut lines: Vec<String> = render_report_text(report, generated_on)
        .lines()
        .map(str::to_string)
        .collect();
    lines.push(String::new());
    lines.push("Reach vs Clicks".to_string());
    lines.extend(TextBarChart::default().render(chart));
    lines
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub page_index: usize,
    /// Vertical position of the image top relative to the page top, in
    /// points. Zero for the first page, negative afterwards.
    pub offset_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page: PageSize,
    pub image_width: f64,
    pub image_height: f64,
    pub placements: Vec<PagePlacement>,
}

impl PageLayout {
    pub fn plan(snapshot: &Snapshot, page: PageSize) -> Self {
        let image_width = page.width;
        let image_height = if snapshot.width_px > 0.0 {
            snapshot.height_px * image_width / snapshot.width_px
        } else {
            0.0
        };

        let mut placements = vec![PagePlacement {
            page_index: 0,
            offset_y: 0.0,
        }];
        // A page with no usable height can hold no slice, so everything
        // goes on the single first page.
        if !(page.height.is_finite() && page.height > 0.0) {
            return PageLayout {
                page,
                image_width,
                image_height,
                placements,
            };
        }
        let mut height_left = image_height - page.height;
        while height_left > f64::EPSILON {
            placements.push(PagePlacement {
                page_index: placements.len(),
                offset_y: height_left - image_height,
            });
            height_left -= page.height;
        }

        PageLayout {
            page,
            image_width,
            image_height,
            placements,
        }
    }

    pub fn page_count(&self) -> usize {
        self.placements.len()
    }

    /// Points per snapshot pixel once the image is fitted to the page width.
    pub fn ratio(&self, snapshot: &Snapshot) -> f64 {
        if snapshot.width_px > 0.0 {
            self.image_width / snapshot.width_px
        } else {
            0.0
        }
    }
}

fn win_ansi_safe(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

/// Writes a [`PageLayout`] as a PDF with `lopdf`.
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    pub page: PageSize,
}

impl PdfExporter {
    pub fn new(page: PageSize) -> Self {
        Self { page }
    }

    fn page_content(&self, snapshot: &Snapshot, layout: &PageLayout, placement: &PagePlacement) -> Content {
        let ratio = layout.ratio(snapshot);
        let font_size = FONT_SIZE * snapshot.scale * ratio;
        let line_height = LINE_HEIGHT * snapshot.scale * ratio;
        let page_height = layout.page.height;

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), (font_size as f32).into()]),
        ];
        for (i, line) in snapshot.lines.iter().enumerate() {
            let baseline = placement.offset_y + (i as f64 + 1.0) * line_height;
            // Lines fully outside this page are clipped by the media box anyway.
            if baseline < 0.0 || baseline - line_height > page_height {
                continue;
            }
            let y = page_height - baseline;
            operations.push(Operation::new(
                "Tm",
                vec![
                    1.into(),
                    0.into(),
                    0.into(),
                    1.into(),
                    0.into(),
                    (y as f32).into(),
                ],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(win_ansi_safe(line))],
            ));
        }
        operations.push(Operation::new("ET", vec![]));
        Content { operations }
    }

    pub fn to_document(&self, snapshot: &Snapshot) -> Result<Document> {
        let layout = PageLayout::plan(snapshot, self.page);
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(layout.page_count());
        for placement in &layout.placements {
            let content = self.page_content(snapshot, &layout, placement);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                (self.page.width as f32).into(),
                (self.page.height as f32).into(),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        debug!(pages = count, image_height = layout.image_height, "Laid out PDF pages");
        Ok(doc)
    }

    pub fn save(&self, snapshot: &Snapshot, path: &Path) -> Result<PathBuf> {
        let mut doc = self.to_document(snapshot)?;
        doc.save(path)?;
        info!(path = %path.display(), "Saved report PDF");
        Ok(path.to_path_buf())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Ready,
    Busy,
}

/// The "download" affordance. It reads busy while an export runs and is
/// always back to ready once the export returns, whatever the outcome.
#[derive(Debug, Default)]
pub struct ExportControl {
    state: ControlState,
}

impl ExportControl {
    pub const READY_LABEL: &'static str = "Download Report as PDF";
    pub const BUSY_LABEL: &'static str = "Generating PDF...";

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            ControlState::Ready => Self::READY_LABEL,
            ControlState::Busy => Self::BUSY_LABEL,
        }
    }

    pub fn acquire(&mut self) -> ExportGuard<'_> {
        self.state = ControlState::Busy;
        ExportGuard { control: self }
    }
}

/// Holds the control busy; dropping it restores the ready state.
pub struct ExportGuard<'a> {
    control: &'a mut ExportControl,
}

impl ExportGuard<'_> {
    pub fn state(&self) -> ControlState {
        self.control.state
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.control.state = ControlState::Ready;
    }
}

/// Snapshot the report region and write it as a paginated PDF.
pub fn export_report(
    control: &mut ExportControl,
    exporter: &PdfExporter,
    snapshot: &Snapshot,
    path: &Path,
) -> Result<PathBuf> {
    let _guard = control.acquire();
    exporter.save(snapshot, path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "PDF export failed");
        match e {
            ReportError::Export(_) => e,
            other => ReportError::Export(other.to_string()),
        }
    })
}
