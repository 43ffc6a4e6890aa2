//! Report generation - renders one day's recap rows as a bordered PDF table.
//!
//! Querying and rendering are kept separate: [`render_recap_table`] is a pure
//! function over recap rows, and [`build_report`] glues the date query, the
//! renderer, and the file write together. The table has twelve fixed columns
//! and grows downward on a single page sized to the row count; there is no
//! pagination.

use crate::{
    core::recap::recaps_for_date,
    entities::recap,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};
use tracing::info;

/// Table columns: header label and cell width in millimeters.
const COLUMNS: [(&str, f32); 12] = [
    ("Customer Name", 32.0),
    ("PO Number", 26.0),
    ("Shade Name", 26.0),
    ("Yarn Bags Required", 30.0),
    ("Yarn Bags Received", 30.0),
    ("Balance Yarn Bags", 30.0),
    ("Knitting Required", 30.0),
    ("Knitting Processed", 30.0),
    ("Balance Knitting", 30.0),
    ("Dyeing Required", 30.0),
    ("Dyeing Processed", 30.0),
    ("Balance Dyeing", 30.0),
];

const MARGIN_MM: f32 = 10.0;
const ROW_HEIGHT_MM: f32 = 10.0;
const TITLE_BLOCK_MM: f32 = 18.0;
const TITLE_FONT_PT: f32 = 16.0;
const CELL_FONT_PT: f32 = 8.0;

// 1 pt = 1/72 inch = 0.3528 mm
const PT_TO_MM: f32 = 0.3528;

/// Generates the PDF report for a date and writes it into `out_dir`.
///
/// The file is named `daily_recap_<date>.pdf` with the ISO date embedded;
/// an existing file of the same name is overwritten. Returns the written
/// path. A date with no recap rows still produces a header-only report.
pub async fn build_report(
    db: &DatabaseConnection,
    date: NaiveDate,
    out_dir: &Path,
) -> Result<PathBuf> {
    let rows = recaps_for_date(db, date).await?;
    let bytes = render_recap_table(date, &rows)?;

    let path = out_dir.join(format!("daily_recap_{date}.pdf"));
    std::fs::write(&path, bytes)?;

    info!(path = %path.display(), rows = rows.len(), "report written");
    Ok(path)
}

/// Renders recap rows as a single-page PDF table.
///
/// Centered bold title, bold header row, one bordered row per recap, numbers
/// stringified without locale formatting. The page height is computed from
/// the row count so the table always fits on its one page.
pub fn render_recap_table(date: NaiveDate, rows: &[recap::Model]) -> Result<Vec<u8>> {
    let table_width: f32 = COLUMNS.iter().map(|(_, w)| w).sum();
    let page_width = table_width + 2.0 * MARGIN_MM;
    // Row count is tiny in practice; precision loss is not a concern here.
    #[allow(clippy::cast_precision_loss)]
    let page_height =
        TITLE_BLOCK_MM + ROW_HEIGHT_MM * (rows.len() as f32 + 1.0) + 2.0 * MARGIN_MM;

    let title = format!("Daily Recap - {date}");
    let (doc, page, layer) =
        PdfDocument::new(title.clone(), Mm(page_width), Mm(page_height), "recap");
    let layer = doc.get_page(page).get_layer(layer);

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::Pdf(e.to_string()))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Pdf(e.to_string()))?;

    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.4);

    // Centered title. Helvetica glyphs average about half the point size in
    // width, close enough for a heading.
    let title_width = approx_text_width_mm(&title, TITLE_FONT_PT);
    let title_x = ((page_width - title_width) / 2.0).max(MARGIN_MM);
    let title_y = page_height - MARGIN_MM - TITLE_FONT_PT * PT_TO_MM;
    layer.use_text(title, TITLE_FONT_PT, Mm(title_x), Mm(title_y), &bold);

    let header: Vec<String> = COLUMNS.iter().map(|(name, _)| (*name).to_string()).collect();
    let mut y = page_height - MARGIN_MM - TITLE_BLOCK_MM;
    draw_row(&layer, &bold, y, &header);
    y -= ROW_HEIGHT_MM;

    for row in rows {
        draw_row(&layer, &regular, y, &row_cells(row));
        y -= ROW_HEIGHT_MM;
    }

    doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
}

/// Draws one table row: a border box and left-aligned text per cell.
fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, top_y: f32, cells: &[String]) {
    let mut x = MARGIN_MM;
    for (&(_, width), text) in COLUMNS.iter().zip(cells.iter()) {
        let border = Line {
            points: vec![
                (Point::new(Mm(x), Mm(top_y)), false),
                (Point::new(Mm(x + width), Mm(top_y)), false),
                (Point::new(Mm(x + width), Mm(top_y - ROW_HEIGHT_MM)), false),
                (Point::new(Mm(x), Mm(top_y - ROW_HEIGHT_MM)), false),
            ],
            is_closed: true,
        };
        layer.add_line(border);
        layer.use_text(
            text.clone(),
            CELL_FONT_PT,
            Mm(x + 1.5),
            Mm(top_y - ROW_HEIGHT_MM + 3.5),
            font,
        );
        x += width;
    }
}

fn row_cells(row: &recap::Model) -> Vec<String> {
    vec![
        row.customer_name.clone(),
        row.po_number.clone(),
        row.shade_name.clone(),
        row.yarn_bags_required.to_string(),
        row.yarn_bags_received.to_string(),
        row.balance_yarn_bags.to_string(),
        row.knitting_required.to_string(),
        row.knitting_processed.to_string(),
        row.balance_knitting.to_string(),
        row.dyeing_required.to_string(),
        row.dyeing_processed.to_string(),
        row.balance_dyeing.to_string(),
    ]
}

#[allow(clippy::cast_precision_loss)]
fn approx_text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * 0.5 * PT_TO_MM
}
