//! PDF writer via `printpdf`. Draws a paginated [`Document`]; converts the
//! top-down cursor into PDF's bottom-up coordinates.

use std::io::BufWriter;

use printpdf::*;

use super::paginate::{Document, Element};
use super::{ExportError, PageLayout};

pub fn write_pdf(doc: &Document, layout: &PageLayout) -> Result<Vec<u8>, ExportError> {
    let width = Mm(layout.width_mm);
    let height = Mm(layout.height_mm);
    let (pdf, page1, layer1) = PdfDocument::new(&doc.title, width, height, "Layer 1");
    let font = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("PDF font error: {e}")))?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("PDF font error: {e}")))?;

    let to_pdf_y = |y_mm: f32| Mm(layout.height_mm - y_mm);
    let x = layout.margin_x_mm;

    for (index, page) in doc.pages.iter().enumerate() {
        let layer = if index == 0 {
            pdf.get_page(page1).get_layer(layer1)
        } else {
            let (p, l) = pdf.add_page(width, height, "Layer 1");
            pdf.get_page(p).get_layer(l)
        };

        for placed in &page.elements {
            let y = to_pdf_y(placed.y_mm);
            match &placed.element {
                Element::DocumentTitle { text } => layer.use_text(text, 14.0, Mm(x), y, &bold),
                Element::Timestamp { text } => layer.use_text(text, 9.0, Mm(x), y, &font),
                Element::SectionTitle { text } => layer.use_text(text, 12.0, Mm(x), y, &bold),
                Element::ComponentTitle { text } => layer.use_text(text, 10.0, Mm(x), y, &bold),
                Element::Line { text } => layer.use_text(text, 9.0, Mm(x), y, &font),
                Element::TableRow {
                    columns,
                    cells,
                    header,
                } => {
                    let face = if *header { &bold } else { &font };
                    for (column, lines) in columns.iter().zip(cells) {
                        let cell_x = Mm(x + column + layout.cell_padding_mm);
                        for (i, line) in lines.iter().enumerate() {
                            let baseline = placed.y_mm
                                + layout.cell_padding_mm
                                + (i + 1) as f32 * layout.table_line_height_mm;
                            layer.use_text(line, 8.0, cell_x, to_pdf_y(baseline), face);
                        }
                    }
                }
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    pdf.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("PDF buffer error: {e}")))
}
