use super::{cell_value, header_name};
use crate::error::{FinderError, Result};
use brand_finder_common::Table;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 先頭シートを読み込む
pub fn load_first_sheet(path: &Path) -> Result<Table> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| FinderError::SpreadsheetRead(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FinderError::SpreadsheetRead("シートがありません".into()))?
        .map_err(|e| FinderError::SpreadsheetRead(e.to_string()))?;

    let mut rows_iter = range.rows();

    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| header_name(&cell_text(cell).unwrap_or_default(), i))
            .collect(),
        None => return Ok(Table::default()),
    };

    let rows = rows_iter
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Table::new(headers, rows))
}

/// セルを文字列に変換（エラーセルは欠損扱い）
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => cell_value(s),
        Data::Float(f) => Some(format_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// 整数値の浮動小数は小数点なしで表示（120.0 → "120"）
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
