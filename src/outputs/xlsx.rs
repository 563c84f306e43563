//! Spreadsheet export.
//!
//! Writes one worksheet laid out as:
//!
//! ```text
//! | № | Название | Дата и время публикации | Ссылка | Рейтинг статьи |   <- bold, centred
//! | 1 | ...      | 10:15, 01.03.2024       | https://...  | 42       |   <- wrapped, top, thin border
//! ```
//!
//! Column widths are fitted to the longest stringified value in each column
//! (header included) plus two, capped at 50.

use crate::error::HarvestError;
use crate::models::ArticleRow;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::{info, instrument};

/// Column headers, in column order.
pub const HEADERS: [&str; 5] = [
    "№",
    "Название",
    "Дата и время публикации",
    "Ссылка",
    "Рейтинг статьи",
];

const WIDTH_PADDING: usize = 2;
const MAX_COLUMN_WIDTH: usize = 50;

/// Write `rows` to a new workbook at `path`.
///
/// # Returns
///
/// `Ok(false)` without touching the filesystem when `rows` is empty,
/// `Ok(true)` once the file is saved.
///
/// # Errors
///
/// [`HarvestError::Save`] if the sheet cannot be built or the file cannot be
/// written.
#[instrument(level = "info", skip(rows), fields(rows = rows.len()))]
pub fn export_rows(rows: &[ArticleRow], path: &str, sheet_name: &str) -> Result<bool, HarvestError> {
    if rows.is_empty() {
        info!("No rows to export; spreadsheet not written");
        return Ok(false);
    }

    let mut workbook = Workbook::new();
    fill_sheet(workbook.add_worksheet(), rows, sheet_name)
        .map_err(|e| HarvestError::save(path, e))?;
    workbook.save(path).map_err(|e| HarvestError::save(path, e))?;

    info!(%path, "Wrote spreadsheet");
    Ok(true)
}

fn fill_sheet(sheet: &mut Worksheet, rows: &[ArticleRow], sheet_name: &str) -> Result<(), XlsxError> {
    sheet.set_name(sheet_name)?;

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let cell_format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_border(FormatBorder::Thin);

    let cells = table_cells(rows);
    for (r, row) in cells.iter().enumerate() {
        let format = if r == 0 { &header_format } else { &cell_format };
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            match cell {
                Cell::Text(text) => sheet.write_string_with_format(r, c, text, format)?,
                Cell::Number(n) => sheet.write_number_with_format(r, c, *n as f64, format)?,
            };
        }
    }

    for (col, width) in column_widths(&cells).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }
    Ok(())
}

/// One worksheet cell. Sequence and score stay numeric in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(i64),
}

impl Cell {
    /// The value as it reads in the sheet, used for width fitting.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

/// The whole sheet: the header row, then one row per record in order.
pub fn table_cells(rows: &[ArticleRow]) -> Vec<[Cell; 5]> {
    let header = HEADERS.map(|h| Cell::Text(h.to_string()));
    std::iter::once(header)
        .chain(rows.iter().map(|row| {
            [
                Cell::Number(row.sequence as i64),
                Cell::Text(row.title.clone()),
                Cell::Text(row.publication_time.clone()),
                Cell::Text(row.link.clone()),
                Cell::Number(row.score),
            ]
        }))
        .collect()
}

/// Fitted width per column, in character units.
pub fn column_widths(cells: &[[Cell; 5]]) -> [usize; 5] {
    let mut widths = [0usize; 5];
    for row in cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.display().chars().count());
        }
    }
    widths.map(|w| (w + WIDTH_PADDING).min(MAX_COLUMN_WIDTH))
}
