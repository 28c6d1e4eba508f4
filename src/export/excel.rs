//! Excel生成
//!
//! rust_xlsxwriter で結果の表を1シートに書き出す。

use crate::error::{FinderError, Result};
use brand_finder_common::Table;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "Results";

pub fn generate_excel(table: &Table, output_path: &Path) -> Result<()> {
    let mut workbook = build_workbook(table)
        .map_err(|e| FinderError::ExcelGeneration(e.to_string()))?;
    workbook
        .save(output_path)
        .map_err(|e| FinderError::ExcelGeneration(e.to_string()))?;
    Ok(())
}

fn build_workbook(table: &Table) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet.write_string(excel_row, col as u16, value)?;
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();

    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_excel() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("result.xlsx");
        let table = Table::from_strings(
            &["Product_Name", "Brand_Name", "MRP"],
            &[&["Colgate Total", "Colgate", "120"], &["Mystery", "Unknown", "Unknown"]],
        );

        generate_excel(&table, &output).unwrap();

        let metadata = std::fs::metadata(&output).unwrap();
        assert!(metadata.len() > 0);
    }
}
