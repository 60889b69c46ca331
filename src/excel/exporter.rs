//! Excel exporter implementation - WorkbookModel → .xlsx

use crate::error::{BookError, BookResult};
use crate::types::{Cell, CellAddr, CellStyle, CellValue, Sheet, WorkbookModel};
use rust_xlsxwriter::{Color, Format, Formula, Url, Workbook, Worksheet};
use std::path::Path;
use tracing::debug;

/// Writes a built workbook model to disk, one worksheet per sheet, in order
pub struct WorkbookExporter<'a> {
    model: &'a WorkbookModel,
}

impl<'a> WorkbookExporter<'a> {
    pub fn new(model: &'a WorkbookModel) -> Self {
        Self { model }
    }

    /// Export the model to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> BookResult<()> {
        let mut workbook = self.build()?;
        workbook.save(output_path).map_err(|e| {
            BookError::Export(format!(
                "Failed to save '{}': {}",
                output_path.display(),
                e
            ))
        })?;
        debug!(path = %output_path.display(), sheets = self.model.len(), "workbook saved");
        Ok(())
    }

    /// Export to an in-memory .xlsx file
    pub fn to_buffer(&self) -> BookResult<Vec<u8>> {
        let mut workbook = self.build()?;
        workbook
            .save_to_buffer()
            .map_err(|e| BookError::Export(format!("Failed to write workbook: {}", e)))
    }

    fn build(&self) -> BookResult<Workbook> {
        let mut workbook = Workbook::new();

        for (idx, sheet) in self.model.sheets().iter().enumerate() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(sheet.name()).map_err(|e| {
                BookError::Export(format!("Failed to set worksheet name '{}': {}", sheet.name(), e))
            })?;
            Self::export_sheet(worksheet, sheet)?;
            if idx == self.model.active_index() {
                worksheet.set_active(true);
            }
        }

        Ok(workbook)
    }

    fn export_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> BookResult<()> {
        worksheet.set_right_to_left(sheet.right_to_left());

        for (&column, &width) in sheet.column_widths() {
            worksheet
                .set_column_width(column - 1, width)
                .map_err(|e| BookError::Export(format!("Failed to set column width: {}", e)))?;
        }

        // Merged ranges go first; the top-left cell is then written over the merge
        for (first, last) in sheet.merges() {
            let format = sheet
                .cell(first.row, first.col)
                .map(|c| Self::format(&c.style))
                .unwrap_or_default();
            let (first_row, first_col) = first.zero_based();
            let (last_row, last_col) = last.zero_based();
            worksheet
                .merge_range(first_row, first_col, last_row, last_col, "", &format)
                .map_err(|e| BookError::Export(format!("Failed to merge range: {}", e)))?;
        }

        for (addr, cell) in sheet.cells() {
            if Self::hidden_by_merge(sheet, addr) {
                continue;
            }
            Self::write_cell(worksheet, addr, cell)?;
        }

        Ok(())
    }

    /// Cells inside a merged range other than its top-left corner
    fn hidden_by_merge(sheet: &Sheet, addr: &CellAddr) -> bool {
        sheet.merges().iter().any(|(first, last)| {
            (first.row..=last.row).contains(&addr.row)
                && (first.col..=last.col).contains(&addr.col)
                && addr != first
        })
    }

    fn write_cell(worksheet: &mut Worksheet, addr: &CellAddr, cell: &Cell) -> BookResult<()> {
        let (row, col) = addr.zero_based();
        let format = Self::format(&cell.style);

        if let Some(target) = &cell.link {
            let mut url = Url::new(format!("internal:{}", target));
            if let CellValue::Text(text) = &cell.value {
                url = url.set_text(text);
            }
            worksheet
                .write_url_with_format(row, col, url, &format)
                .map_err(|e| {
                    BookError::Export(format!("Failed to write hyperlink at {}: {}", addr, e))
                })?;
            return Ok(());
        }

        match &cell.value {
            CellValue::Number(value) => {
                worksheet
                    .write_number_with_format(row, col, *value, &format)
                    .map_err(|e| {
                        BookError::Export(format!("Failed to write number at {}: {}", addr, e))
                    })?;
            }
            CellValue::Text(text) => {
                worksheet
                    .write_string_with_format(row, col, text, &format)
                    .map_err(|e| {
                        BookError::Export(format!("Failed to write text at {}: {}", addr, e))
                    })?;
            }
            CellValue::Formula(formula) => {
                worksheet
                    .write_formula_with_format(row, col, Formula::new(formula), &format)
                    .map_err(|e| {
                        BookError::Export(format!("Failed to write formula at {}: {}", addr, e))
                    })?;
            }
        }
        Ok(())
    }

    fn format(style: &CellStyle) -> Format {
        let mut format = Format::new();
        if style.bold {
            format = format.set_bold();
        }
        if style.italic {
            format = format.set_italic();
        }
        if let Some(size) = style.font_size {
            format = format.set_font_size(size);
        }
        if let Some(rgb) = style.font_color {
            format = format.set_font_color(Color::RGB(rgb));
        }
        if let Some(rgb) = style.fill {
            format = format.set_background_color(Color::RGB(rgb));
        }
        if let Some(number_format) = &style.number_format {
            format = format.set_num_format(number_format);
        }
        if style.wrap {
            format = format.set_text_wrap();
        }
        format
    }
}
