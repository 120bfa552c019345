//! PDF export of a [`Report`].
//!
//! Export runs in two steps: [`layout`] decides what goes on which page, and
//! the renderer turns that layout into PDF bytes with `printpdf`.

use chrono::Local;
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    model::Report,
    rows::{DisplayRow, project},
};

pub const TABLE_HEADER: [&str; 6] = ["Day", "Weather", "Precipitation", "Min Temp", "Max Temp", "Wind"];

// A4 portrait, millimetres measured from the top-left corner.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_X: f32 = 14.0;
const TITLE_Y: f32 = 20.0;
const SUBTITLE_Y: [f32; 2] = [28.0, 34.0];
const TABLE_START_Y: f32 = 40.0;
const CONTINUATION_START_Y: f32 = 15.0;
const BOTTOM_MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 1.8;

// Average Helvetica advance width, in ems.
const AVG_CHAR_EM: f32 = 0.55;
const PT_TO_MM: f32 = 25.4 / 72.0;
const ELLIPSIS: &str = "...";

const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 11.0;
const CELL_SIZE: f32 = 10.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to render PDF document: {0}")]
    Render(String),
}

/// Finished document, ready to be written wherever the caller wants.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Text content and pagination of the exported report.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub subtitles: [String; 2],
    pub pages: Vec<TablePage>,
}

/// The slice of the table printed on one page. The header row is repeated on
/// every page and is not part of `rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage {
    /// Distance of the table's top edge from the top of the page, in mm.
    pub start_y: f32,
    pub rows: Vec<[String; 6]>,
}

impl DocumentLayout {
    pub fn body_row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }

    pub fn body_rows(&self) -> impl Iterator<Item = &[String; 6]> {
        self.pages.iter().flat_map(|p| p.rows.iter())
    }
}

pub fn filename(report: &Report) -> String {
    format!("{}_weather_forecast.pdf", report.city)
}

/// Generation date in the local timezone, e.g. `3/9/2024`.
pub fn generated_on(report: &Report) -> String {
    report.generated_at.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

pub fn layout(report: &Report) -> DocumentLayout {
    let cells: Vec<[String; 6]> = project(report).iter().map(table_cells).collect();

    let mut pages = Vec::new();
    let mut remaining = cells.as_slice();
    let mut start_y = TABLE_START_Y;

    loop {
        let take = remaining.len().min(rows_per_page(start_y));
        let (page_rows, rest) = remaining.split_at(take);
        pages.push(TablePage { start_y, rows: page_rows.to_vec() });

        if rest.is_empty() {
            break;
        }
        remaining = rest;
        start_y = CONTINUATION_START_Y;
    }

    DocumentLayout {
        title: format!("{} Weather Forecast Report", report.city),
        subtitles: [
            format!("Next {} days", report.day_count()),
            format!("Generated on: {}", generated_on(report)),
        ],
        pages,
    }
}

pub fn export(report: &Report) -> Result<ExportedDocument, ExportError> {
    let layout = layout(report);
    debug!(
        city = %report.city,
        rows = layout.body_row_count(),
        pages = layout.pages.len(),
        "Laid out forecast report"
    );

    let bytes = render(&layout)?;
    let filename = filename(report);

    info!(filename = %filename, size = bytes.len(), "Exported forecast report");

    Ok(ExportedDocument { bytes, filename })
}

fn table_cells(row: &DisplayRow) -> [String; 6] {
    [
        row.day_label.clone(),
        row.weather_label.clone(),
        row.precipitation_text.clone(),
        format!("{}C", row.temp_min_text),
        format!("{}C", row.temp_max_text),
        row.wind_text.clone(),
    ]
}

/// Body rows that fit below `start_y`, leaving room for the header row.
fn rows_per_page(start_y: f32) -> usize {
    let slots = ((PAGE_HEIGHT - BOTTOM_MARGIN - start_y) / ROW_HEIGHT).floor() as usize;
    slots.saturating_sub(1).max(1)
}

fn render(layout: &DocumentLayout) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(layout.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..layout.pages.len() {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for (i, (page, layer)) in layout.pages.iter().zip(&layers).enumerate() {
        if i == 0 {
            draw_heading(layer, layout, &regular);
        }
        draw_table(layer, page, &regular, &bold);
    }

    doc.save_to_bytes().map_err(|e| ExportError::Render(e.to_string()))
}

fn draw_heading(layer: &PdfLayerReference, layout: &DocumentLayout, font: &IndirectFontRef) {
    layer.set_fill_color(black());
    layer.use_text(layout.title.as_str(), TITLE_SIZE, Mm(MARGIN_X), from_top(TITLE_Y), font);

    layer.set_fill_color(Color::Greyscale(Greyscale::new(100.0 / 255.0, None)));
    for (text, y) in layout.subtitles.iter().zip(SUBTITLE_Y) {
        layer.use_text(text.as_str(), SUBTITLE_SIZE, Mm(MARGIN_X), from_top(y), font);
    }
}

fn draw_table(
    layer: &PdfLayerReference,
    page: &TablePage,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let column_width = (PAGE_WIDTH - 2.0 * MARGIN_X) / TABLE_HEADER.len() as f32;
    let text_width = column_width - 2.0 * CELL_PADDING;
    let line_count = page.rows.len() + 1;
    let bottom = page.start_y + line_count as f32 * ROW_HEIGHT;

    layer.set_fill_color(black());
    for (col, title) in TABLE_HEADER.iter().enumerate() {
        let x = MARGIN_X + col as f32 * column_width + CELL_PADDING;
        layer.use_text(*title, CELL_SIZE, Mm(x), baseline(page.start_y), bold);
    }

    for (n, row) in page.rows.iter().enumerate() {
        let top = page.start_y + (n + 1) as f32 * ROW_HEIGHT;
        for (col, cell) in row.iter().enumerate() {
            let x = MARGIN_X + col as f32 * column_width + CELL_PADDING;
            let text = fit_to_width(cell, text_width, CELL_SIZE);
            layer.use_text(text, CELL_SIZE, Mm(x), baseline(top), regular);
        }
    }

    layer.set_outline_color(Color::Greyscale(Greyscale::new(0.6, None)));
    layer.set_outline_thickness(0.5);

    for k in 0..=line_count {
        let y = page.start_y + k as f32 * ROW_HEIGHT;
        layer.add_line(segment((MARGIN_X, y), (PAGE_WIDTH - MARGIN_X, y)));
    }
    for col in 0..=TABLE_HEADER.len() {
        let x = MARGIN_X + col as f32 * column_width;
        layer.add_line(segment((x, page.start_y), (x, bottom)));
    }
}

/// Shorten `text` with a trailing ellipsis so it stays inside `width` mm.
fn fit_to_width(text: &str, width: f32, font_size: f32) -> String {
    let max_chars = (width / (font_size * PT_TO_MM * AVG_CHAR_EM)).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    format!("{}{ELLIPSIS}", text.chars().take(keep).collect::<String>())
}

fn segment(from: (f32, f32), to: (f32, f32)) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(from.0), from_top(from.1)), false),
            (Point::new(Mm(to.0), from_top(to.1)), false),
        ],
        is_closed: false,
    }
}

fn baseline(row_top: f32) -> Mm {
    from_top(row_top + ROW_HEIGHT - 2.5)
}

// printpdf measures y from the bottom edge.
fn from_top(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

fn black() -> Color {
    Color::Greyscale(Greyscale::new(0.0, None))
}
