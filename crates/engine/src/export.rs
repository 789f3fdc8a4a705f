//! Spreadsheet export
//!
//! Serializes a transaction table to an xlsx workbook with the header
//! row visually distinguished (bold white text on a solid blue fill).
//! Formatting only — no computation happens here.

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};
use salesdash_core::{DashboardError, Transaction, REQUIRED_COLUMNS};

const HEADER_FILL: u32 = 0x4F81BD;
const SHEET_NAME: &str = "Sales Ledger";

/// Serialize the table to an in-memory xlsx blob
///
/// Columns follow the ledger order; dates render as `%Y-%m-%d` and
/// missing revenue cells stay blank.
///
/// # Errors
///
/// Returns an `Export` error when workbook serialization fails.
pub fn export_workbook(transactions: &[Transaction]) -> Result<Vec<u8>, DashboardError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(export_err)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL));

    for (col, name) in REQUIRED_COLUMNS.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *name, &header_format)
            .map_err(export_err)?;
    }

    for (index, transaction) in transactions.iter().enumerate() {
        write_row(sheet, (index + 1) as u32, transaction).map_err(export_err)?;
    }

    workbook.save_to_buffer().map_err(export_err)
}

fn write_row(sheet: &mut Worksheet, row: u32, t: &Transaction) -> Result<(), XlsxError> {
    sheet.write(row, 0, &t.client)?;
    sheet.write(row, 1, &t.product)?;
    sheet.write(row, 2, &t.product_type)?;
    sheet.write(row, 3, &t.segment)?;
    sheet.write(row, 4, &t.market)?;
    sheet.write(row, 5, &t.state)?;
    sheet.write(row, 6, &t.country)?;
    sheet.write(row, 7, &t.municipality)?;
    sheet.write(row, 8, &t.continent)?;
    sheet.write(row, 9, &t.tax_zone)?;
    sheet.write(row, 10, &t.product_origin)?;
    sheet.write(row, 11, t.date.format("%Y-%m-%d").to_string())?;
    if let Some(revenue) = t.revenue {
        sheet.write(row, 12, revenue)?;
    }
    sheet.write(row, 13, t.quantity as f64)?;
    sheet.write(row, 14, &t.abc_client)?;
    sheet.write(row, 15, &t.abc_product)?;
    sheet.write(row, 16, &t.month)?;
    Ok(())
}

fn export_err(e: XlsxError) -> DashboardError {
    DashboardError::export(e.to_string())
}
