//! Table-layout primitive: equal-width columns, wrapped cells, per-row
//! heights. Pagination of rows happens in `paginate`.

use super::paginate::wrap_text;
use super::PageLayout;

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Wrapped lines per cell.
    pub cells: Vec<Vec<String>>,
    pub height_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Left edge of each column, relative to the content margin.
    pub columns: Vec<f32>,
    pub header: TableRow,
    pub rows: Vec<TableRow>,
}

pub fn layout_table(headers: &[String], rows: &[Vec<String>], layout: &PageLayout) -> TableLayout {
    let count = headers.len().max(1);
    let width = layout.content_width() / count as f32;
    let columns = (0..count).map(|i| i as f32 * width).collect();
    let max_chars = ((width - 2.0 * layout.cell_padding_mm) / layout.table_char_width_mm)
        .floor()
        .max(1.0) as usize;

    let wrap_row = |cells: &[String]| {
        let cells: Vec<Vec<String>> = (0..count)
            .map(|i| wrap_text(cells.get(i).map(String::as_str).unwrap_or(""), max_chars))
            .collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        TableRow {
            height_mm: lines as f32 * layout.table_line_height_mm + 2.0 * layout.cell_padding_mm,
            cells,
        }
    };

    TableLayout {
        columns,
        header: wrap_row(headers),
        rows: rows.iter().map(|r| wrap_row(r)).collect(),
    }
}
