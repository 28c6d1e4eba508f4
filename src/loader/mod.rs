//! 表ファイル読み込みモジュール
//!
//! CSV（csv crate）と Excel/ODS（calamine）を `Table` に読み込む。
//! 先頭行をヘッダーとし、空セルや "NA" などの欠損表記は `None` にする。

mod csv_reader;
mod spreadsheet;

pub use csv_reader::read_csv;

use crate::error::{FinderError, Result};
use brand_finder_common::Table;
use std::path::Path;
use tracing::debug;

/// 欠損として扱うセル表記
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN",
    "None", "n/a", "nan", "null",
];

/// 表ファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Csv,
    Spreadsheet,
}

impl TableKind {
    /// 拡張子から種類を判定
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(TableKind::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Some(TableKind::Spreadsheet),
            _ => None,
        }
    }
}

/// 表ファイルを読み込む
pub fn load_table(path: &Path) -> Result<Table> {
    if !path.exists() {
        return Err(FinderError::FileNotFound(path.display().to_string()));
    }

    let kind = TableKind::from_path(path)
        .ok_or_else(|| FinderError::UnsupportedFormat(path.display().to_string()))?;

    let table = match kind {
        TableKind::Csv => csv_reader::load_csv(path)?,
        TableKind::Spreadsheet => spreadsheet::load_first_sheet(path)?,
    };

    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers().len(),
        "table loaded"
    );
    Ok(table)
}

/// セル文字列を欠損判定して変換
fn cell_value(raw: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&raw.trim()) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// ヘッダー名（空なら "Unnamed: n"）
fn header_name(raw: &str, index: usize) -> String {
    if raw.trim().is_empty() {
        format!("Unnamed: {}", index)
    } else {
        raw.to_string()
    }
}
