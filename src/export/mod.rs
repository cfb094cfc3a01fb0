//! Document exporter.
//!
//! A synchronous pass over the same `Response` the interactive renderer
//! uses: `content` picks what each component prints, `paginate` places it
//! on A4 pages, `pdf` draws the pages. When no structured response exists
//! the caller's [`RasterExporter`] captures the on-screen view instead.

pub mod content;
pub mod paginate;
pub mod pdf;
pub mod table;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use thiserror::Error;

use crate::models::Response;

pub use content::{block_for, DocBlock, NO_CONTENT};
pub use paginate::{paginate, Document, Element, Page, Placed, DEFAULT_DOCUMENT_TITLE};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export target not found: {0}")]
    MissingTarget(String),

    #[error("Raster capture failed: {0}")]
    Raster(String),

    #[error("Export blocked: {pending} edit(s) still in progress")]
    EditsInProgress { pending: usize },

    #[error("Cannot determine export directory")]
    NoExportDir,
}

// ─── Options ────────────────────────────────────────────────

/// Which view the artifact comes from; names the default file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    /// Detailed record view.
    Prontuario,
    Insights,
    ResumoGeral,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prontuario => "prontuario",
            Self::Insights => "insights",
            Self::ResumoGeral => "resumo-geral",
        }
    }
}

/// A4 page geometry and break thresholds, all in mm measured from the top
/// edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_x_mm: f32,
    pub top_margin_mm: f32,
    /// Section and component titles start a new page past this point.
    pub section_break_mm: f32,
    /// Wrapped text lines start a new page past this point.
    pub line_break_mm: f32,
    /// Table rows may not extend beyond this point.
    pub table_break_mm: f32,
    pub line_height_mm: f32,
    pub table_line_height_mm: f32,
    pub cell_padding_mm: f32,
    /// Average glyph width of 9pt body text.
    pub char_width_mm: f32,
    /// Average glyph width of 8pt table text.
    pub table_char_width_mm: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_x_mm: 15.0,
            top_margin_mm: 20.0,
            section_break_mm: 260.0,
            line_break_mm: 280.0,
            table_break_mm: 282.0,
            line_height_mm: 5.0,
            table_line_height_mm: 4.2,
            cell_padding_mm: 1.2,
            char_width_mm: 1.9,
            table_char_width_mm: 1.7,
        }
    }
}

impl PageLayout {
    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_x_mm
    }

    pub fn max_line_chars(&self) -> usize {
        (self.content_width() / self.char_width_mm).floor().max(1.0) as usize
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub kind: ExportKind,
    /// Overrides the default `<kind>-<YYYY-MM-DD>.pdf`.
    pub filename: Option<String>,
    pub generated_at: DateTime<Local>,
    pub layout: PageLayout,
}

impl ExportOptions {
    pub fn new(kind: ExportKind) -> Self {
        Self {
            kind,
            filename: None,
            generated_at: Local::now(),
            layout: PageLayout::default(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn file_name(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| default_filename(self.kind, &self.generated_at))
    }
}

pub fn default_filename(kind: ExportKind, at: &DateTime<Local>) -> String {
    format!("{}-{}.pdf", kind.as_str(), at.format("%Y-%m-%d"))
}

/// A finished export, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

// ─── Structured path ────────────────────────────────────────

/// Render `response` into a PDF artifact. Never fails on content; only
/// the PDF writer itself can error.
pub fn export_document(response: &Response, options: &ExportOptions) -> Result<Artifact, ExportError> {
    let stamp = options.generated_at.format("%d/%m/%Y %H:%M").to_string();
    let doc = paginate(response, &options.layout, &stamp);
    let bytes = pdf::write_pdf(&doc, &options.layout)?;
    let filename = options.file_name();

    tracing::info!(
        filename = %filename,
        sections = response.sections.len(),
        components = response.component_count(),
        pages = doc.pages.len(),
        bytes = bytes.len(),
        "Exported document"
    );

    Ok(Artifact { filename, bytes })
}

// ─── Raster fallback ────────────────────────────────────────

/// Screenshot-style export of an on-screen view, provided by the host.
pub trait RasterExporter {
    /// Capture `target`; `None` when the target does not exist.
    fn capture(&self, target: &str) -> Result<Option<Vec<u8>>, ExportError>;
}

/// Structured export whenever a response exists; otherwise delegate to the
/// raster exporter for `target`.
pub fn export_or_capture(
    response: Option<&Response>,
    raster: &dyn RasterExporter,
    target: &str,
    options: &ExportOptions,
) -> Result<Artifact, ExportError> {
    if let Some(response) = response {
        return export_document(response, options);
    }
    tracing::info!(target = %target, "No structured response, using raster capture");
    let bytes = raster
        .capture(target)?
        .ok_or_else(|| ExportError::MissingTarget(target.to_string()))?;
    Ok(Artifact {
        filename: options.file_name(),
        bytes,
    })
}

// ─── Output ─────────────────────────────────────────────────

/// Write `artifact` into `dir`, creating it if needed.
pub fn write_artifact(artifact: &Artifact, dir: &Path) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.filename);
    std::fs::write(&path, &artifact.bytes)?;
    tracing::info!(path = %path.display(), "Artifact written");
    Ok(path)
}

/// Write `artifact` into the default exports directory.
pub fn write_to_exports(artifact: &Artifact) -> Result<PathBuf, ExportError> {
    let dir = crate::config::exports_dir().ok_or(ExportError::NoExportDir)?;
    write_artifact(artifact, &dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, Section};
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap()
    }

    struct FakeRaster {
        known: &'static str,
    }

    impl RasterExporter for FakeRaster {
        fn capture(&self, target: &str) -> Result<Option<Vec<u8>>, ExportError> {
            if target == "offscreen" {
                return Err(ExportError::Raster("canvas not attached".into()));
            }
            Ok((target == self.known).then(|| b"PNG".to_vec()))
        }
    }

    #[test]
    fn default_filename_uses_kind_and_date() {
        let options = ExportOptions::new(ExportKind::ResumoGeral).with_generated_at(fixed_time());
        assert_eq!(options.file_name(), "resumo-geral-2025-03-10.pdf");
        let options = options.with_filename("custom.pdf");
        assert_eq!(options.file_name(), "custom.pdf");
    }

    #[test]
    fn zero_sections_export_does_not_fail() {
        let options = ExportOptions::new(ExportKind::Prontuario).with_generated_at(fixed_time());
        let artifact = export_document(&Response::new("", vec![]), &options).unwrap();
        assert_eq!(&artifact.bytes[0..4], b"%PDF");
        assert_eq!(artifact.filename, "prontuario-2025-03-10.pdf");
    }

    #[test]
    fn structured_path_wins_over_raster() {
        let response = Response::new(
            "P",
            vec![Section::new("S", vec![Card::new("symptoms_card", "Sintomas", json!({}))])],
        );
        let raster = FakeRaster { known: "view" };
        let options = ExportOptions::new(ExportKind::Insights);
        let artifact = export_or_capture(Some(&response), &raster, "missing", &options).unwrap();
        assert_eq!(&artifact.bytes[0..4], b"%PDF");
    }

    #[test]
    fn raster_fallback_and_missing_target() {
        let raster = FakeRaster { known: "view" };
        let options = ExportOptions::new(ExportKind::Insights);
        let artifact = export_or_capture(None, &raster, "view", &options).unwrap();
        assert_eq!(artifact.bytes, b"PNG");

        let err = export_or_capture(None, &raster, "gone", &options).unwrap_err();
        assert!(matches!(err, ExportError::MissingTarget(ref t) if t == "gone"));
    }

    #[test]
    fn raster_capture_failure_reaches_caller() {
        let raster = FakeRaster { known: "view" };
        let options = ExportOptions::new(ExportKind::Insights);
        let err = export_or_capture(None, &raster, "offscreen", &options).unwrap_err();
        assert!(matches!(err, ExportError::Raster(ref msg) if msg == "canvas not attached"));
        assert_eq!(err.to_string(), "Raster capture failed: canvas not attached");
    }

    #[test]
    fn write_artifact_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");
        let artifact = Artifact {
            filename: "test.pdf".into(),
            bytes: b"%PDF-1.4 test content".to_vec(),
        };
        let path = write_artifact(&artifact, &dir).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
        assert!(path.starts_with(&dir));
    }

    #[test]
    fn max_line_chars_from_geometry() {
        let layout = PageLayout::default();
        assert_eq!(layout.content_width(), 180.0);
        assert_eq!(layout.max_line_chars(), 94);
    }
}
