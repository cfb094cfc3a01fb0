//! Pure page model. A top-down cursor (mm from the top edge) walks the
//! response and starts new pages at fixed thresholds. Nothing here touches
//! PDF types; `pdf` only draws what this module placed.

use serde::Serialize;

use super::content::{block_for, DocBlock, NO_CONTENT};
use super::table::{layout_table, TableRow};
use super::PageLayout;
use crate::assemble::{EMPTY_RESPONSE_MESSAGE, EMPTY_SECTION_MESSAGE};
use crate::models::{Card, Response, Section};

pub const DEFAULT_DOCUMENT_TITLE: &str = "Prontuário Médico";

// ─── Model ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    DocumentTitle { text: String },
    Timestamp { text: String },
    SectionTitle { text: String },
    ComponentTitle { text: String },
    Line { text: String },
    TableRow {
        /// Column left edges relative to the content margin.
        columns: Vec<f32>,
        cells: Vec<Vec<String>>,
        header: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placed {
    pub y_mm: f32,
    pub element: Element,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub elements: Vec<Placed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Document {
    /// Every printed string in reading order. Table cells are joined per row.
    pub fn texts(&self) -> Vec<String> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .map(|placed| match &placed.element {
                Element::DocumentTitle { text }
                | Element::Timestamp { text }
                | Element::SectionTitle { text }
                | Element::ComponentTitle { text }
                | Element::Line { text } => text.clone(),
                Element::TableRow { cells, .. } => cells
                    .iter()
                    .map(|c| c.join(" "))
                    .collect::<Vec<_>>()
                    .join(" | "),
            })
            .collect()
    }
}

// ─── Cursor ─────────────────────────────────────────────────

struct Cursor<'a> {
    layout: &'a PageLayout,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(layout: &'a PageLayout) -> Self {
        Self {
            layout,
            pages: vec![Page::default()],
            y: layout.top_margin_mm,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.layout.top_margin_mm;
    }

    fn break_past(&mut self, threshold: f32) {
        if self.y > threshold {
            self.new_page();
        }
    }

    fn place(&mut self, element: Element, advance: f32) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(Placed {
                y_mm: self.y,
                element,
            });
        }
        self.y += advance;
    }

    fn place_row(&mut self, columns: &[f32], row: &TableRow, header: bool) {
        self.place(
            Element::TableRow {
                columns: columns.to_vec(),
                cells: row.cells.clone(),
                header,
            },
            row.height_mm,
        );
    }

    fn lines(&mut self, text: &str) {
        for line in wrap_text(text, self.layout.max_line_chars()) {
            self.break_past(self.layout.line_break_mm);
            self.place(Element::Line { text: line }, self.layout.line_height_mm);
        }
    }
}

// ─── Pagination ─────────────────────────────────────────────

pub fn paginate(response: &Response, layout: &PageLayout, generated_at: &str) -> Document {
    let title = if response.page_title.trim().is_empty() {
        DEFAULT_DOCUMENT_TITLE.to_string()
    } else {
        response.page_title.clone()
    };

    let mut cursor = Cursor::new(layout);
    cursor.place(Element::DocumentTitle { text: title.clone() }, 8.0);
    cursor.place(
        Element::Timestamp {
            text: format!("Gerado em: {generated_at}"),
        },
        10.0,
    );

    if response.sections.is_empty() {
        cursor.lines(EMPTY_RESPONSE_MESSAGE);
    }
    for section in &response.sections {
        emit_section(&mut cursor, section);
    }

    Document {
        title,
        pages: cursor.pages,
    }
}

fn emit_section(cursor: &mut Cursor<'_>, section: &Section) {
    cursor.break_past(cursor.layout.section_break_mm);
    cursor.place(
        Element::SectionTitle {
            text: section.title.clone(),
        },
        8.0,
    );
    if let Some(description) = &section.description {
        cursor.lines(description);
    }
    if section.components.is_empty() {
        cursor.lines(EMPTY_SECTION_MESSAGE);
    }
    for card in &section.components {
        emit_component(cursor, card);
    }
    cursor.y += 4.0;
}

fn emit_component(cursor: &mut Cursor<'_>, card: &Card) {
    cursor.break_past(cursor.layout.section_break_mm);
    cursor.place(
        Element::ComponentTitle {
            text: card.title.clone(),
        },
        6.0,
    );
    match block_for(card) {
        DocBlock::Table { headers, rows } => emit_table(cursor, &headers, &rows),
        DocBlock::Lines { lines } => {
            for line in &lines {
                cursor.lines(line);
            }
        }
        DocBlock::Empty => cursor.lines(NO_CONTENT),
    }
    cursor.y += 3.0;
}

/// Rows break at the table limit; the column header repeats on each
/// continuation page, the component title does not.
fn emit_table(cursor: &mut Cursor<'_>, headers: &[String], rows: &[Vec<String>]) {
    let table = layout_table(headers, rows, cursor.layout);
    let limit = cursor.layout.table_break_mm;
    let first = table.rows.first().map_or(0.0, |r| r.height_mm);

    if cursor.y + table.header.height_mm + first > limit {
        cursor.new_page();
    }
    cursor.place_row(&table.columns, &table.header, true);
    for row in &table.rows {
        if cursor.y + row.height_mm > limit {
            cursor.new_page();
            cursor.place_row(&table.columns, &table.header, true);
        }
        cursor.place_row(&table.columns, row, false);
    }
}

/// Simple word-wrap helper for PDF text rendering.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let current_len = current.chars().count();
        if current_len + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
